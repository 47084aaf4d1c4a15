mod request;
mod response;

use crate::auth::Identity;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::car::request::{
    CreateRequest, DeleteRequest, GetRequest, PageQuery, Transformer, UpdateRequest,
};
use crate::route::car::response::{CarResponse, Presenter};
use application::service::{CreateCarService, DeleteCarService, GetCarService, UpdateCarService};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

pub trait CarRouter {
    fn route_car(self) -> Self;
}

impl CarRouter for Router<AppModule> {
    fn route_car(self) -> Self {
        self.route(
            "/cars",
            get(
                |State(module): State<AppModule>, Query(req): Query<PageQuery>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().get_all_cars(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().create_car(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/recentcars",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { module.pgpool().get_recent_cars().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/cars/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_car(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(CarResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().update_car(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteRequest::new(id))
                        .handle(|dto| async move { module.pgpool().delete_car(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/mycars/:email",
            get(
                |State(module): State<AppModule>,
                 identity: Identity,
                 Path(email): Path<String>,
                 Query(req): Query<PageQuery>| async move {
                    identity.authorize(&email)?;
                    Controller::new(Transformer, Presenter)
                        .intake((identity.into_email(), req))
                        .handle(|dto| async move { module.pgpool().get_my_cars(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
