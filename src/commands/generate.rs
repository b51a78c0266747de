//! Generate static files from the content API

use anyhow::Result;

use crate::api::HttpContentSource;
use crate::generator::Generator;
use crate::Caravel;

/// Generate the static site
pub async fn run(caravel: &Caravel) -> Result<()> {
    let start = std::time::Instant::now();

    let source = HttpContentSource::new(caravel.config.api_url.clone())?;
    let generator = Generator::new(caravel, source)?;
    generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
