use crate::db::billing::{insert_period, last_window, load_period_for_project, update_period};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::projects::{
    insert_activity, insert_business, insert_project, list_activities, list_businesses,
    load_activity, load_business, load_project, search_projects, update_project,
};
use crate::errors::{AppError, AppResult};
use crate::models::interval::Interval;
use crate::models::project::{Activity, Business, Project};
use crate::models::repeat_period::RepeatPeriod;
use chrono::NaiveDate;
use rusqlite::Connection;

pub(crate) fn require_project(conn: &Connection, id: i64) -> AppResult<Project> {
    load_project(conn, id)?.ok_or(AppError::ProjectNotFound(id))
}

pub(crate) fn require_business(conn: &Connection, id: i64) -> AppResult<Business> {
    load_business(conn, id)?.ok_or(AppError::BusinessNotFound(id))
}

pub(crate) fn require_activity(conn: &Connection, id: i64) -> AppResult<Activity> {
    load_activity(conn, id)?.ok_or(AppError::ActivityNotFound(id))
}

/// Cadence requested for a project's repeat period.
///
/// `count` and `interval` left as `None` keep the cadence of an existing
/// period; a new period falls back to 1 × `default_interval`.
#[derive(Debug, Clone)]
pub struct PeriodSettings {
    pub count: Option<i64>,
    pub interval: Option<Interval>,
    pub default_interval: Interval,
    pub start: Option<NaiveDate>,
    pub active: bool,
}

pub struct ProjectLogic;

impl ProjectLogic {
    pub fn create_business(pool: &mut DbPool, name: &str) -> AppResult<Business> {
        let name = non_empty(name, "business name")?;
        let id = insert_business(&pool.conn, name)?;
        audit(&pool.conn, "business", &format!("business {id}"), name);
        require_business(&pool.conn, id)
    }

    pub fn businesses(pool: &DbPool) -> AppResult<Vec<Business>> {
        list_businesses(&pool.conn)
    }

    pub fn create_activity(pool: &mut DbPool, code: &str, name: &str) -> AppResult<Activity> {
        let code = non_empty(code, "activity code")?;
        let name = non_empty(name, "activity name")?;
        let id = insert_activity(&pool.conn, code, name)?;
        audit(&pool.conn, "activity", &format!("activity {id}"), code);
        require_activity(&pool.conn, id)
    }

    pub fn activities(pool: &DbPool) -> AppResult<Vec<Activity>> {
        list_activities(&pool.conn)
    }

    pub fn create_project(
        pool: &mut DbPool,
        business_id: i64,
        name: &str,
        description: &str,
    ) -> AppResult<Project> {
        require_business(&pool.conn, business_id)?;
        let name = non_empty(name, "project name")?;
        let id = insert_project(&pool.conn, business_id, name, description)?;
        audit(&pool.conn, "project", &format!("project {id}"), name);
        require_project(&pool.conn, id)
    }

    pub fn edit_project(
        pool: &mut DbPool,
        id: i64,
        name: Option<&str>,
        business_id: Option<i64>,
        description: Option<&str>,
    ) -> AppResult<Project> {
        let mut project = require_project(&pool.conn, id)?;

        if let Some(n) = name {
            project.name = non_empty(n, "project name")?.to_string();
        }
        if let Some(b) = business_id {
            project.business_name = require_business(&pool.conn, b)?.name;
            project.business_id = b;
        }
        if let Some(d) = description {
            project.description = d.to_string();
        }

        update_project(&pool.conn, &project)?;
        audit(&pool.conn, "project", &format!("project {id}"), "updated");
        Ok(project)
    }

    /// Projects whose name or description contains `search`, or all of them.
    pub fn list_projects(pool: &DbPool, search: Option<&str>) -> AppResult<Vec<Project>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        search_projects(&pool.conn, search)
    }

    /// A project together with its repeat period, if it has one.
    pub fn view_project(pool: &DbPool, id: i64) -> AppResult<(Project, Option<RepeatPeriod>)> {
        let project = require_project(&pool.conn, id)?;
        let period = load_period_for_project(&pool.conn, id)?;
        Ok((project, period))
    }

    /// Create or update the single repeat period of a project.
    ///
    /// Without `settings.start` a new period is anchored on `today`. Once a period
    /// has windows its anchor can no longer be moved; a cadence change then
    /// continues from the end of the last window.
    pub fn set_repeat_period(
        pool: &mut DbPool,
        project_id: i64,
        settings: PeriodSettings,
        today: NaiveDate,
    ) -> AppResult<RepeatPeriod> {
        require_project(&pool.conn, project_id)?;

        let tx = pool.conn.transaction()?;

        let period = match load_period_for_project(&tx, project_id)? {
            None => {
                let mut p = RepeatPeriod::new(
                    project_id,
                    settings.count.unwrap_or(1),
                    settings.interval.unwrap_or(settings.default_interval),
                    settings.start.unwrap_or(today),
                    settings.active,
                )?;
                p.id = insert_period(&tx, &p)?;
                p
            }
            Some(mut p) => {
                let last = last_window(&tx, p.id)?;

                if let Some(start) = settings.start
                    && start != p.anchor_date
                {
                    if let Some(w) = &last {
                        return Err(AppError::InvalidTimeRange(format!(
                            "period already has billing windows; the next one starts on {}",
                            w.end_date
                        )));
                    }
                    p.anchor_date = start;
                }

                let count = settings.count.unwrap_or(i64::from(p.count));
                let interval = settings.interval.unwrap_or(p.interval);
                p.reschedule(count, interval, last.as_ref())?;
                p.active = settings.active;
                update_period(&tx, &p)?;
                p
            }
        };

        tx.commit()?;

        audit(
            &pool.conn,
            "period",
            &format!("project {project_id}"),
            &format!(
                "{} from {}{}",
                period.describe(),
                period.anchor_date,
                if period.active { "" } else { " (inactive)" }
            ),
        );

        Ok(period)
    }
}

fn non_empty<'a>(value: &'a str, what: &str) -> AppResult<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        Err(AppError::Other(format!("{what} cannot be empty")))
    } else {
        Ok(v)
    }
}
