//! Seed client: fetches and validates the initial grid.

use duolife_core::{CellState, Error, Result, SeedSource};
use duolife_world::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Built-in fixture, the same payload the seed server serves.
const FIXTURE: &str = include_str!("../../../fixtures/seed.json");

/// Wire shape of the seed payload: `{ "data": { "state": [[..]] } }`.
#[derive(Debug, Deserialize)]
struct SeedPayload {
    data: SeedData,
}

#[derive(Debug, Deserialize)]
struct SeedData {
    state: Vec<Vec<CellState>>,
}

pub struct SeedClient {
    http: Client,
}

impl SeedClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Load(e.to_string()))?;
        Ok(Self { http })
    }

    /// Resolve a seed source to a validated grid.
    ///
    /// Every failure mode (transport, decode, shape, cell values)
    /// comes back as a load error; the session never starts on one.
    #[instrument(skip(self))]
    pub async fn load(&self, source: &SeedSource) -> Result<Grid> {
        match source {
            SeedSource::Url(url) => self.fetch(url).await,
            SeedSource::Fixture => parse_seed(FIXTURE),
            SeedSource::Random { rows, cols, seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                Grid::random(*rows, *cols, &mut rng)
                    .map_err(|e| Error::Load(e.to_string()))
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Grid> {
        debug!("fetching seed from {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Load(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Load(format!(
                "seed endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Load(e.to_string()))?;
        let grid = parse_seed(&body)?;

        info!(rows = grid.rows(), cols = grid.cols(), "seed loaded");
        Ok(grid)
    }
}

/// Parse and validate a seed payload into a grid.
pub fn parse_seed(body: &str) -> Result<Grid> {
    let payload: SeedPayload = serde_json::from_str(body)?;
    Grid::from_rows(payload.data.state).map_err(|e| Error::Load(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture() {
        let grid = parse_seed(FIXTURE).unwrap();
        assert_eq!(grid.rows(), 12);
        assert_eq!(grid.cols(), 20);
        assert_eq!(grid.get(1, 2), CellState::Sad);
        assert_eq!(grid.get(1, 6), CellState::Happy);
    }

    #[test]
    fn test_parse_empty_payload_is_load_error() {
        // A response with no data.state must surface as a load error.
        assert!(matches!(parse_seed("{}"), Err(Error::Load(_))));
    }

    #[test]
    fn test_parse_empty_matrix_is_load_error() {
        let body = r#"{ "data": { "state": [] } }"#;
        assert!(matches!(parse_seed(body), Err(Error::Load(_))));
    }

    #[test]
    fn test_parse_ragged_matrix_is_load_error() {
        let body = r#"{ "data": { "state": [[0, 1], [2]] } }"#;
        assert!(matches!(parse_seed(body), Err(Error::Load(_))));
    }

    #[test]
    fn test_parse_out_of_range_cell_is_load_error() {
        let body = r#"{ "data": { "state": [[0, 3]] } }"#;
        assert!(matches!(parse_seed(body), Err(Error::Load(_))));
    }

    #[tokio::test]
    async fn test_load_fixture_source() {
        let client = SeedClient::new().unwrap();
        let grid = client.load(&SeedSource::Fixture).await.unwrap();
        assert_eq!(grid.rows(), 12);
    }

    #[tokio::test]
    async fn test_load_random_source_is_deterministic() {
        let client = SeedClient::new().unwrap();
        let source = SeedSource::Random {
            rows: 8,
            cols: 16,
            seed: 7,
        };
        let first = client.load(&source).await.unwrap();
        let second = client.load(&source).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.rows(), 8);
        assert_eq!(first.cols(), 16);
    }
}
