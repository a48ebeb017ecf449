//! Goal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store finalized goals together with their ordered tasks.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Goal::validate()` before SQL mutations.
//! - A goal and its tasks are written in one transaction.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::goal::{Goal, GoalId, GoalValidationError, GoalWindow};
use crate::model::task::{GoalTask, TaskId};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const GOAL_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    start_date,
    finish_date,
    created_at
FROM goals";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for goal persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(GoalValidationError),
    Db(DbError),
    NotFound(GoalId),
    InvalidData(String),
    /// Connection was not migrated to the schema this binary expects.
    SchemaNotReady { found: u32, expected: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "goal not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted goal data: {message}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "goal schema version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GoalValidationError> for RepoError {
    fn from(value: GoalValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Paging options for listing goals, newest first.
#[derive(Debug, Clone, Default)]
pub struct GoalListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for finalized goals.
pub trait GoalRepository {
    fn create_goal(&self, goal: &Goal) -> RepoResult<GoalId>;
    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>>;
    fn list_goals(&self, query: &GoalListQuery) -> RepoResult<Vec<Goal>>;
    fn count_goals(&self) -> RepoResult<usize>;
}

/// SQLite-backed goal repository.
pub struct SqliteGoalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGoalRepository<'conn> {
    /// Wraps a connection after checking it is fully migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }

    fn load_tasks(&self, goal_uuid: GoalId) -> RepoResult<Vec<GoalTask>> {
        let mut stmt = self.conn.prepare(
            "SELECT task_uuid, text
             FROM goal_tasks
             WHERE goal_uuid = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([goal_uuid.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("task_uuid")?;
            let id = TaskId::parse(&id_text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid task id `{id_text}` in goal_tasks.task_uuid"
                ))
            })?;
            let task = GoalTask::with_id(id, row.get::<_, String>("text")?).map_err(|err| {
                RepoError::InvalidData(format!("{err} in goal_tasks.text for task {id}"))
            })?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    fn hydrate(&self, header: GoalHeader) -> RepoResult<Goal> {
        let tasks = self.load_tasks(header.uuid)?;
        let goal = Goal {
            uuid: header.uuid,
            title: header.title,
            tasks,
            window: header.window,
            created_at: header.created_at,
        };
        goal.validate()
            .map_err(|err| RepoError::InvalidData(format!("goal {}: {err}", goal.uuid)))?;
        Ok(goal)
    }
}

impl GoalRepository for SqliteGoalRepository<'_> {
    fn create_goal(&self, goal: &Goal) -> RepoResult<GoalId> {
        goal.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO goals (uuid, title, start_date, finish_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                goal.uuid.to_string(),
                goal.title.as_str(),
                goal.window.map(|window| date_to_db(window.start)),
                goal.window.map(|window| date_to_db(window.finish)),
                goal.created_at,
            ],
        )?;
        {
            let mut insert_task = tx.prepare(
                "INSERT INTO goal_tasks (task_uuid, goal_uuid, position, text)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for (position, task) in goal.tasks.iter().enumerate() {
                insert_task.execute(params![
                    task.id.to_string(),
                    goal.uuid.to_string(),
                    i64::try_from(position).unwrap_or(i64::MAX),
                    task.text.as_str(),
                ])?;
            }
        }
        tx.commit()?;

        Ok(goal.uuid)
    }

    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        let header = match rows.next()? {
            Some(row) => parse_goal_header(row)?,
            None => return Ok(None),
        };
        self.hydrate(header).map(Some)
    }

    fn list_goals(&self, query: &GoalListQuery) -> RepoResult<Vec<Goal>> {
        let mut sql = format!("{GOAL_SELECT_SQL} ORDER BY created_at DESC, uuid ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        match query.limit {
            Some(limit) => {
                sql.push_str(" LIMIT ? OFFSET ?");
                bind_values.push(Value::Integer(i64::from(limit)));
            }
            None => sql.push_str(" LIMIT -1 OFFSET ?"),
        }
        bind_values.push(Value::Integer(i64::from(query.offset)));

        let headers = {
            let mut stmt = self.conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut headers = Vec::new();
            while let Some(row) = rows.next()? {
                headers.push(parse_goal_header(row)?);
            }
            headers
        };

        headers
            .into_iter()
            .map(|header| self.hydrate(header))
            .collect()
    }

    fn count_goals(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM goals;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("invalid goal count `{count}`")))
    }
}

struct GoalHeader {
    uuid: GoalId,
    title: String,
    window: Option<GoalWindow>,
    created_at: i64,
}

fn parse_goal_header(row: &Row<'_>) -> RepoResult<GoalHeader> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in goals.uuid"))
    })?;

    let start = parse_optional_date(row.get("start_date")?, "goals.start_date")?;
    let finish = parse_optional_date(row.get("finish_date")?, "goals.finish_date")?;
    let window = match (start, finish) {
        (Some(start), Some(finish)) => Some(
            GoalWindow::new(start, finish)
                .map_err(|err| RepoError::InvalidData(format!("{err} in goal {uuid}")))?,
        ),
        (None, None) => None,
        _ => {
            return Err(RepoError::InvalidData(format!(
                "goal {uuid} has only one of start_date/finish_date"
            )));
        }
    };

    Ok(GoalHeader {
        uuid,
        title: row.get("title")?,
        window,
        created_at: row.get("created_at")?,
    })
}

fn parse_optional_date(value: Option<String>, column: &str) -> RepoResult<Option<NaiveDate>> {
    value
        .map(|text| {
            NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| {
                RepoError::InvalidData(format!("invalid date `{text}` in {column}"))
            })
        })
        .transpose()
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
