use std::{net::IpAddr, sync::Arc};

use axum::Router;
use inquiry_core_contact_contracts::ContactService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    contact: Contact,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactService,
{
    pub fn new(contact: Contact) -> Self {
        Self { contact }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(Arc::new(self.contact)));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        router.layer(CorsLayer::permissive())
    }
}
