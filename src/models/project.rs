use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Business {
    pub id: i64,
    pub name: String,
}

/// A named unit of work belonging to a business.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub business_id: i64,
    pub business_name: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: i64,
    pub code: String,
    pub name: String,
}
