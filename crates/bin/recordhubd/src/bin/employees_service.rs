//! Employee records service — serves `/employees`.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    recordhubd::run(recordhub_domain::schema::EMPLOYEES).await
}
