//! Company model: CRUD and filtered search over the `companies` table.

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::model::job::JobSummary;
use crate::row::{FromRow, RowExt};
use crate::sql::{FieldMap, SetFragment, WhereFragment};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracing::debug;

/// Columns returned by every company-shaped query.
const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Attributes whose API spelling differs from their storage column.
static COMPANY_FIELDS: FieldMap = FieldMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// A company, keyed by its handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// A company together with its job postings.
///
/// `jobs` is always a list; a company without postings carries `[]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Insert input for [`Company::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Sparse update for [`Company::update`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    fn into_fragment(self) -> SetFragment {
        let mut set = SetFragment::new(COMPANY_FIELDS);
        set.set_opt("name", self.name)
            .set_opt("description", self.description)
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url);
        set
    }
}

/// Search filter for [`Company::find_filtered`]; every predicate is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the company name
    pub name: Option<String>,
    /// Inclusive lower bound on `num_employees`
    pub min_employees: Option<i32>,
    /// Inclusive upper bound on `num_employees`
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Build the WHERE fragment for this filter.
    ///
    /// Predicates bind in fixed order (name, lower bound, upper bound) so
    /// placeholder numbering is deterministic. Fails with
    /// [`ModelError::InvalidRange`] before anything is built when the
    /// employee bounds are inverted.
    pub fn to_fragment(&self) -> ModelResult<WhereFragment> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(ModelError::InvalidRange { min, max });
            }
        }

        let mut frag = WhereFragment::new();
        frag.and_contains_opt("name", self.name.as_deref())
            .and_gte_opt("num_employees", self.min_employees)
            .and_lte_opt("num_employees", self.max_employees);
        Ok(frag)
    }
}

impl Company {
    /// Insert a new company.
    ///
    /// Fails with [`ModelError::DuplicateKey`] when the handle is already
    /// taken. The existence check and the insert are two round-trips; a
    /// concurrent duplicate that wins the race fails the primary-key
    /// constraint instead and is surfaced as the same error.
    pub async fn create(client: &impl GenericClient, data: NewCompany) -> ModelResult<Company> {
        let existing = client
            .query_opt(
                "SELECT handle FROM companies WHERE handle = $1",
                &[&data.handle],
            )
            .await?;
        if existing.is_some() {
            return Err(ModelError::duplicate_key(format!(
                "company '{}' already exists",
                data.handle
            )));
        }

        debug!(handle = %data.handle, "creating company");
        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLUMNS}"
        );
        let row = client
            .query_one(
                &sql,
                &[
                    &data.handle,
                    &data.name,
                    &data.description,
                    &data.num_employees,
                    &data.logo_url,
                ],
            )
            .await?;
        Company::from_row(&row)
    }

    /// List all companies, ordered by name.
    pub async fn find_all(client: &impl GenericClient) -> ModelResult<Vec<Company>> {
        Self::find_filtered(client, &CompanyFilter::default()).await
    }

    /// List companies matching a filter, ordered by name.
    pub async fn find_filtered(
        client: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> ModelResult<Vec<Company>> {
        let frag = filter.to_fragment()?;

        let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies");
        if !frag.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&frag.clause());
        }
        sql.push_str(" ORDER BY name");

        debug!(sql = %sql, "searching companies");
        let rows = client.query(&sql, &frag.params_ref()).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Fetch a company and its job postings by handle.
    pub async fn get(client: &impl GenericClient, handle: &str) -> ModelResult<CompanyWithJobs> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
        let row = client
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("company '{handle}'")))?;
        let company = Company::from_row(&row)?;

        let rows = client
            .query(
                "SELECT id, title, salary, equity FROM jobs \
                 WHERE company_handle = $1 ORDER BY id",
                &[&handle],
            )
            .await?;
        let jobs = rows
            .iter()
            .map(JobSummary::from_row)
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(CompanyWithJobs { company, jobs })
    }

    /// Partially update a company; absent fields are left untouched.
    ///
    /// Fails with [`ModelError::EmptyPayload`] when the patch is empty and
    /// [`ModelError::NotFound`] when no row matches the handle.
    pub async fn update(
        client: &impl GenericClient,
        handle: &str,
        patch: CompanyPatch,
    ) -> ModelResult<Company> {
        let set = patch.into_fragment();
        let set_clause = set.clause()?;

        let sql = format!(
            "UPDATE companies SET {set_clause} WHERE handle = ${} RETURNING {COMPANY_COLUMNS}",
            set.next_index()
        );
        let mut params = set.params_ref();
        params.push(&handle);

        debug!(handle = %handle, fields = set.len(), "updating company");
        let row = client
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| ModelError::not_found(format!("company '{handle}'")))?;
        Company::from_row(&row)
    }

    /// Delete a company by handle.
    pub async fn remove(client: &impl GenericClient, handle: &str) -> ModelResult<()> {
        debug!(handle = %handle, "deleting company");
        let affected = client
            .execute("DELETE FROM companies WHERE handle = $1", &[&handle])
            .await?;
        if affected == 0 {
            return Err(ModelError::not_found(format!("company '{handle}'")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_fragment_translates_columns_in_order() {
        let patch = CompanyPatch {
            name: Some("Acme".into()),
            description: None,
            num_employees: Some(50),
            logo_url: Some("http://acme.example/logo.png".into()),
        };
        let set = patch.into_fragment();
        assert_eq!(
            set.clause().unwrap(),
            "\"name\" = $1, \"num_employees\" = $2, \"logo_url\" = $3"
        );
        assert_eq!(set.params_ref().len(), 3);
        assert_eq!(set.next_index(), 4);
    }

    #[test]
    fn empty_patch_is_rejected() {
        let set = CompanyPatch::default().into_fragment();
        assert!(matches!(set.clause(), Err(ModelError::EmptyPayload)));
    }

    #[test]
    fn filter_orders_predicates_deterministically() {
        let filter = CompanyFilter {
            name: Some("net".into()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let frag = filter.to_fragment().unwrap();
        assert_eq!(
            frag.clause(),
            "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(frag.params_ref().len(), 3);
    }

    #[test]
    fn filter_with_no_predicates_is_empty() {
        let frag = CompanyFilter::default().to_fragment().unwrap();
        assert!(frag.is_empty());
        assert_eq!(frag.clause(), "");
        assert!(frag.params_ref().is_empty());
    }

    #[test]
    fn inverted_employee_range_is_rejected() {
        let filter = CompanyFilter {
            name: None,
            min_employees: Some(10),
            max_employees: Some(5),
        };
        let err = filter.to_fragment().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidRange { min: 10, max: 5 }
        ));
    }

    #[test]
    fn equal_employee_bounds_are_allowed() {
        let filter = CompanyFilter {
            name: None,
            min_employees: Some(7),
            max_employees: Some(7),
        };
        let frag = filter.to_fragment().unwrap();
        assert_eq!(
            frag.clause(),
            "num_employees >= $1 AND num_employees <= $2"
        );
    }

    #[test]
    fn company_serializes_with_api_attribute_names() {
        let company = Company {
            handle: "acme".into(),
            name: "Acme Widgets".into(),
            description: "Widgets".into(),
            num_employees: Some(50),
            logo_url: None,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["numEmployees"], 50);
        assert_eq!(json["logoUrl"], serde_json::Value::Null);
        assert!(json.get("num_employees").is_none());
    }

    #[test]
    fn company_with_jobs_flattens_company_fields() {
        let with_jobs = CompanyWithJobs {
            company: Company {
                handle: "acme".into(),
                name: "Acme Widgets".into(),
                description: "Widgets".into(),
                num_employees: None,
                logo_url: None,
            },
            jobs: Vec::new(),
        };
        let json = serde_json::to_value(&with_jobs).unwrap();
        assert_eq!(json["handle"], "acme");
        assert_eq!(json["jobs"], serde_json::json!([]));
    }

    #[test]
    fn filter_deserializes_from_api_attribute_names() {
        let filter: CompanyFilter =
            serde_json::from_str(r#"{"name":"ab","minEmployees":2}"#).unwrap();
        assert_eq!(filter.name.as_deref(), Some("ab"));
        assert_eq!(filter.min_employees, Some(2));
        assert_eq!(filter.max_employees, None);
    }
}
