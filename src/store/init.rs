//! Store initialization.
use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};

/// Build a MongoDB client for the given connection string, pinned to the v1
/// stable server API with strict checking.
///
/// The client connects lazily, so this succeeding only means the connection
/// string parses; an unreachable server surfaces as errors on first use.
///
/// # Errors
/// Errors if the connection string cannot be parsed or the client cannot be
/// constructed from it.
pub async fn connect(mongo_url: &str) -> anyhow::Result<Client> {
    let mut options = ClientOptions::parse(mongo_url).await?;
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    let client = Client::with_options(options)?;
    Ok(client)
}
