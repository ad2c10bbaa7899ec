//! Vehicle inventory service — serves `/cars`.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    recordhubd::run(recordhub_domain::schema::CARS).await
}
