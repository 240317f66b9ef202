//! Job model: CRUD and filtered search over the `jobs` table.

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{FieldMap, SetFragment, WhereFragment};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracing::debug;

/// Columns returned by every job-shaped query.
const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// A job posting, keyed by its surrogate id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// The job shape nested under a company (no `companyHandle`; the parent
/// carries it).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl FromRow for JobSummary {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

/// Insert input for [`Job::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Sparse update for [`Job::update`]; `None` fields are left untouched.
///
/// The id and the owning company are not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl JobPatch {
    fn into_fragment(self) -> SetFragment {
        // Every patchable job attribute already matches its column name.
        let mut set = SetFragment::new(FieldMap::EMPTY);
        set.set_opt("title", self.title)
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity);
        set
    }
}

/// Search filter for [`Job::find_filtered`]; every predicate is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilter {
    /// Case-insensitive substring match on the job title
    pub title: Option<String>,
    /// Inclusive lower bound on salary
    pub min_salary: Option<i32>,
    /// When true, only jobs with a strictly positive equity share
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Build the WHERE fragment for this filter.
    ///
    /// Predicates bind in fixed order (title, salary floor, equity flag).
    /// `has_equity: Some(false)` filters nothing, same as absent.
    pub fn to_fragment(&self) -> WhereFragment {
        let mut frag = WhereFragment::new();
        frag.and_contains_opt("title", self.title.as_deref())
            .and_gte_opt("salary", self.min_salary);
        if self.has_equity == Some(true) {
            frag.and_raw("equity > 0");
        }
        frag
    }
}

impl Job {
    /// Insert a new job posting.
    ///
    /// A `companyHandle` that matches no company surfaces as
    /// [`ModelError::ForeignKey`].
    pub async fn create(client: &impl GenericClient, data: NewJob) -> ModelResult<Job> {
        debug!(title = %data.title, company = %data.company_handle, "creating job");
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        );
        let row = client
            .query_one(
                &sql,
                &[&data.title, &data.salary, &data.equity, &data.company_handle],
            )
            .await?;
        Job::from_row(&row)
    }

    /// List all jobs, ordered by title.
    pub async fn find_all(client: &impl GenericClient) -> ModelResult<Vec<Job>> {
        Self::find_filtered(client, &JobFilter::default()).await
    }

    /// List jobs matching a filter, ordered by title.
    pub async fn find_filtered(
        client: &impl GenericClient,
        filter: &JobFilter,
    ) -> ModelResult<Vec<Job>> {
        let frag = filter.to_fragment();

        let mut sql = format!("SELECT {JOB_COLUMNS} FROM jobs");
        if !frag.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&frag.clause());
        }
        sql.push_str(" ORDER BY title");

        debug!(sql = %sql, "searching jobs");
        let rows = client.query(&sql, &frag.params_ref()).await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// Fetch a job by id.
    pub async fn get(client: &impl GenericClient, id: i32) -> ModelResult<Job> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = client
            .query_opt(&sql, &[&id])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("job {id}")))?;
        Job::from_row(&row)
    }

    /// Partially update a job; absent fields are left untouched.
    pub async fn update(
        client: &impl GenericClient,
        id: i32,
        patch: JobPatch,
    ) -> ModelResult<Job> {
        let set = patch.into_fragment();
        let set_clause = set.clause()?;

        let sql = format!(
            "UPDATE jobs SET {set_clause} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            set.next_index()
        );
        let mut params = set.params_ref();
        params.push(&id);

        debug!(id, fields = set.len(), "updating job");
        let row = client
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| ModelError::not_found(format!("job {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a job by id.
    pub async fn remove(client: &impl GenericClient, id: i32) -> ModelResult<()> {
        debug!(id, "deleting job");
        let affected = client
            .execute("DELETE FROM jobs WHERE id = $1", &[&id])
            .await?;
        if affected == 0 {
            return Err(ModelError::not_found(format!("job {id}")));
        }
        Ok(())
    }
}
