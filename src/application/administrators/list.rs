use crate::domain::administrators::{
    Administrator, AdministratorRepository, BloodGroup, Gender, fields,
};
use crate::domain::documents::{Filter, Stage};
use crate::shared::error::AppError;
use crate::shared::validation::ValidationFailure;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

const TOTAL_FIELD: &str = "total";

/// `filter[...]` query parameters. Every present field must match exactly.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorFilter {
    pub email: Option<String>,
    pub designation: Option<String>,
    #[schema(example = "Female")]
    pub gender: Option<String>,
    #[schema(example = "O+")]
    pub blood_group: Option<String>,
}

impl AdministratorFilter {
    fn to_filter(&self) -> Result<Filter, ValidationFailure> {
        let mut filter = Filter::new();
        if let Some(email) = &self.email {
            filter = filter.eq(fields::EMAIL, email.as_str());
        }
        if let Some(designation) = &self.designation {
            filter = filter.eq(fields::DESIGNATION, designation.as_str());
        }
        if let Some(gender) = &self.gender {
            let gender: Gender = gender.parse()?;
            filter = filter.eq(fields::GENDER, gender.as_str());
        }
        if let Some(blood_group) = &self.blood_group {
            let blood_group: BloodGroup = blood_group.parse()?;
            filter = filter.eq(fields::BLOOD_GROUP, blood_group.as_str());
        }
        Ok(filter)
    }
}

/// `page[number]` and `page[size]` query parameters.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PageParams {
    /// 1-indexed
    #[serde(default = "default_page_number")]
    #[schema(example = 1, minimum = 1)]
    pub number: u64,
    #[serde(default = "default_page_size")]
    #[schema(example = 20, minimum = 1, maximum = 100)]
    pub size: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            number: default_page_number(),
            size: default_page_size(),
        }
    }
}

fn default_page_number() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListAdministratorsRequest {
    #[serde(default)]
    pub filter: AdministratorFilter,
    #[serde(default)]
    pub page: PageParams,
}

/// One page of live administrators plus the number of matches overall.
#[derive(Debug)]
pub struct AdministratorPage {
    pub administrators: Vec<Administrator>,
    pub number: u64,
    pub size: u64,
    pub total: u64,
}

pub struct ListAdministratorsUseCase {
    repo: Arc<dyn AdministratorRepository>,
}

impl ListAdministratorsUseCase {
    pub fn new(repo: Arc<dyn AdministratorRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        req: ListAdministratorsRequest,
    ) -> Result<AdministratorPage, AppError> {
        let size = req.page.size.clamp(1, MAX_PAGE_SIZE);
        let number = req.page.number.max(1);
        let filter = req.filter.to_filter()?;

        let skip = (number - 1).saturating_mul(size);
        let documents = self
            .repo
            .aggregate(vec![
                Stage::Match(filter.clone()),
                Stage::Skip(usize::try_from(skip).unwrap_or(usize::MAX)),
                Stage::Limit(usize::try_from(size).unwrap_or(usize::MAX)),
            ])
            .await?;
        let administrators = documents
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Administrator>, _>>()?;

        let counted = self
            .repo
            .aggregate(vec![Stage::Match(filter), Stage::count(TOTAL_FIELD)])
            .await?;
        let total = counted
            .first()
            .and_then(|document| document.get(TOTAL_FIELD))
            .and_then(|total| total.as_u64())
            .unwrap_or_default();

        Ok(AdministratorPage {
            administrators,
            number,
            size,
            total,
        })
    }
}
