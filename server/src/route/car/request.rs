use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateCarDto, DeleteCarDto, GetAllCarsDto, GetCarDto, GetMyCarsDto, UpdateCarDto,
};
use kernel::prelude::entity::{PageNumber, PageSize, SearchTerm, SortKey, UserEmail};

use crate::controller::Intake;

/// Raw paging query. Everything is optional text; unparsable values fall back
/// to their defaults instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
    sort: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    name: String,
    #[serde(rename = "type")]
    category: String,
    location: String,
    price: i64,
    description: String,
    added_by: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    name: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
    location: Option<String>,
    price: Option<i64>,
    description: Option<String>,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<PageQuery> for Transformer {
    type To = GetAllCarsDto;
    fn emit(&self, input: PageQuery) -> Self::To {
        GetAllCarsDto {
            page: PageNumber::lenient(input.page.as_deref()),
            limit: PageSize::lenient(input.limit.as_deref(), PageSize::LISTING),
            sort: SortKey::lenient(input.sort.as_deref()),
            search: input.search.and_then(SearchTerm::new),
        }
    }
}

impl Intake<(UserEmail, PageQuery)> for Transformer {
    type To = GetMyCarsDto;
    fn emit(&self, input: (UserEmail, PageQuery)) -> Self::To {
        let (owner, query) = input;
        GetMyCarsDto {
            owner,
            page: PageNumber::lenient(query.page.as_deref()),
            limit: PageSize::lenient(query.limit.as_deref(), PageSize::LISTING),
            sort: SortKey::lenient(query.sort.as_deref()),
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetCarDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetCarDto { id: input.id }
    }
}

impl Intake<CreateRequest> for Transformer {
    type To = CreateCarDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateCarDto {
            name: input.name,
            category: input.category,
            location: input.location,
            price: input.price,
            description: input.description,
            added_by: input.added_by,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateCarDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateCarDto {
            id,
            name: input.name,
            category: input.category,
            location: input.location,
            price: input.price,
            description: input.description,
        }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteCarDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteCarDto { id: input.id }
    }
}
