use driver::database::PostgresDatabase;
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;

use crate::auth::TokenAuthority;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    tokens: TokenAuthority,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        let tokens = TokenAuthority::from_env()?;

        Ok(Self { pgpool, tokens })
    }

    pub fn pgpool(&self) -> &PostgresDatabase {
        &self.pgpool
    }

    pub fn tokens(&self) -> &TokenAuthority {
        &self.tokens
    }
}
