use respond::{Responder, ResponseConfig, ResponseRequest, Sender};
use serde::Serialize;
use uhsapi::{
    header::{HeaderMap, HeaderName},
    http::StatusCode,
};

#[derive(Serialize)]
struct Greeting {
    message: &'static str,
    count: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let responder = Responder::new(
        ResponseConfig::default()
            .with_default_header(HeaderName::CONTENT_TYPE, "application/json")
            .with_default_header(HeaderName::from_static("X-App-Version"), "1.0"),
    );

    let mut inbound = HeaderMap::new();
    inbound.append(HeaderName::ACCEPT, "application/json");

    let mut sender = Sender::new(tokio::io::stdout());
    ResponseRequest::with(&Greeting {
        message: "hello",
        count: 1,
    })
    .status(StatusCode::CREATED)
    .to(&responder, &mut sender, &inbound)?;
    sender.flush().await?;
    Ok(())
}
