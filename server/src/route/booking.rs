mod request;
mod response;

use crate::auth::Identity;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::booking::request::{
    CreateRequest, GetBookingsRequest, GetRequestsRequest, PageQuery, Transformer, UpdateRequest,
};
use crate::route::booking::response::Presenter;
use application::service::{CreateBookingService, GetBookingService, UpdateBookingService};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

pub trait BookingRouter {
    fn route_booking(self) -> Self;
}

impl BookingRouter for Router<AppModule> {
    fn route_booking(self) -> Self {
        self.route(
            "/bookings",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().create_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            // GET reads the segment as the renter's email, PATCH as the
            // booking id. One registration because axum rejects two routes
            // that differ only in the parameter name.
            "/bookings/:id",
            get(
                |State(module): State<AppModule>,
                 identity: Identity,
                 Path(email): Path<String>,
                 Query(req): Query<PageQuery>| async move {
                    identity.authorize(&email)?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetBookingsRequest::new(identity.into_email(), req))
                        .handle(|dto| async move { module.pgpool().get_bookings(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move {
                            module.pgpool().update_booking_status(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/requests/:email",
            get(
                |State(module): State<AppModule>,
                 identity: Identity,
                 Path(email): Path<String>,
                 Query(req): Query<PageQuery>| async move {
                    identity.authorize(&email)?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequestsRequest::new(identity.into_email(), req))
                        .handle(|dto| async move { module.pgpool().get_requests(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
