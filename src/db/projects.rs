use crate::errors::AppResult;
use crate::models::project::{Activity, Business, Project};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const PROJECT_SELECT: &str = r#"
    SELECT p.id, p.business_id, b.name AS business_name, p.name, p.description
    FROM projects p
    JOIN businesses b ON b.id = p.business_id
"#;

fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        business_id: row.get("business_id")?,
        business_name: row.get("business_name")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

fn map_business(row: &Row) -> rusqlite::Result<Business> {
    Ok(Business {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn map_activity(row: &Row) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
    })
}

// ---------------------------
// Businesses
// ---------------------------

pub fn insert_business(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO businesses (name, created_at) VALUES (?1, ?2)",
        params![name, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_business(conn: &Connection, id: i64) -> AppResult<Option<Business>> {
    let b = conn
        .query_row(
            "SELECT id, name FROM businesses WHERE id = ?1",
            [id],
            map_business,
        )
        .optional()?;
    Ok(b)
}

pub fn list_businesses(conn: &Connection) -> AppResult<Vec<Business>> {
    let mut stmt = conn.prepare("SELECT id, name FROM businesses ORDER BY name ASC, id ASC")?;
    let rows = stmt.query_map([], map_business)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Projects
// ---------------------------

pub fn insert_project(
    conn: &Connection,
    business_id: i64,
    name: &str,
    description: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO projects (business_id, name, description, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![business_id, name, description, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_project(conn: &Connection, p: &Project) -> AppResult<()> {
    conn.execute(
        "UPDATE projects SET business_id = ?1, name = ?2, description = ?3 WHERE id = ?4",
        params![p.business_id, p.name, p.description, p.id],
    )?;
    Ok(())
}

pub fn load_project(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let sql = format!("{PROJECT_SELECT} WHERE p.id = ?1");
    let p = conn.query_row(&sql, [id], map_project).optional()?;
    Ok(p)
}

/// All projects, or those whose name or description contains `search`
/// (case-insensitive), ordered by name.
pub fn search_projects(conn: &Connection, search: Option<&str>) -> AppResult<Vec<Project>> {
    let mut out = Vec::new();

    match search {
        Some(term) => {
            let pattern = format!("%{}%", escape_like(term));
            let sql = format!(
                "{PROJECT_SELECT}
                 WHERE p.name LIKE ?1 ESCAPE '\\' OR p.description LIKE ?1 ESCAPE '\\'
                 ORDER BY p.name ASC, p.id ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            for r in stmt.query_map([pattern], map_project)? {
                out.push(r?);
            }
        }
        None => {
            let sql = format!("{PROJECT_SELECT} ORDER BY p.name ASC, p.id ASC");
            let mut stmt = conn.prepare(&sql)?;
            for r in stmt.query_map([], map_project)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// ---------------------------
// Activities
// ---------------------------

pub fn insert_activity(conn: &Connection, code: &str, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO activities (code, name) VALUES (?1, ?2)",
        params![code, name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_activity(conn: &Connection, id: i64) -> AppResult<Option<Activity>> {
    let a = conn
        .query_row(
            "SELECT id, code, name FROM activities WHERE id = ?1",
            [id],
            map_activity,
        )
        .optional()?;
    Ok(a)
}

pub fn list_activities(conn: &Connection) -> AppResult<Vec<Activity>> {
    let mut stmt = conn.prepare("SELECT id, code, name FROM activities ORDER BY code ASC")?;
    let rows = stmt.query_map([], map_activity)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
