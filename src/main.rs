#[tokio::main]
async fn main() -> anyhow::Result<()> {
    plant_tracker::bootstrapper::run().await
}
