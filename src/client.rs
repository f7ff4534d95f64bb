//! HTTP client for communicating with ferien-server

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::process::{Child, Command};
use std::time::Duration;

use ferien_core::{Assignee, DateWrite, HolidayCalendar, IsoDate, VacationRecord};

const MAX_RETRIES: u32 = 10;
const RETRY_DELAY_MS: u64 = 200;

/// HTTP client for ferien-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

// Request and response types matching the server API

#[derive(Serialize)]
struct SetVacationRequest<'a> {
    date: &'a IsoDate,
    #[serde(rename = "userId")]
    user_id: Option<Assignee>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetRangeRequest<'a> {
    start_date: &'a str,
    end_date: &'a str,
    user_id: Assignee,
}

#[derive(Deserialize)]
struct SetRangeResponse {
    previous: Vec<DateWrite>,
}

#[derive(Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl Client {
    /// Connect to existing server or start one
    pub async fn connect(port: u16) -> Result<Self> {
        let http = reqwest::Client::new();
        let client = Self {
            http,
            base_url: format!("http://127.0.0.1:{port}"),
        };

        // Try to connect to existing server
        if client.health_check().await.is_ok() {
            return Ok(client);
        }

        // Server not running - start it
        tracing::debug!(port, "Server not reachable, starting ferien-server");
        let mut server = start_server(port)?;

        // Wait for server to be ready
        for _ in 0..MAX_RETRIES {
            tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
            if client.health_check().await.is_ok() {
                return Ok(client);
            }
            if let Some(status) = server.try_wait()? {
                anyhow::bail!("ferien-server exited ({status}) before accepting connections");
            }
        }

        anyhow::bail!("Failed to connect to ferien-server after starting it")
    }

    async fn health_check(&self) -> Result<()> {
        self.http
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// GET /api/vacations
    pub async fn list_vacations(&self) -> Result<Vec<VacationRecord>> {
        let resp = self
            .http
            .get(format!("{}/api/vacations", self.base_url))
            .send()
            .await
            .context("Failed to connect to server")?;

        parse_response(resp).await
    }

    /// POST /api/vacations
    pub async fn set_vacation(&self, date: &IsoDate, assignee: Option<Assignee>) -> Result<()> {
        let resp = self
            .http
            .post(format!("{}/api/vacations", self.base_url))
            .json(&SetVacationRequest {
                date,
                user_id: assignee,
            })
            .send()
            .await
            .context("Failed to connect to server")?;

        parse_response::<serde_json::Value>(resp).await?;
        Ok(())
    }

    /// POST /api/vacations/range. Returns the previous tag of every touched date.
    pub async fn set_range(
        &self,
        start: &str,
        end: &str,
        assignee: Assignee,
    ) -> Result<Vec<DateWrite>> {
        let resp = self
            .http
            .post(format!("{}/api/vacations/range", self.base_url))
            .json(&SetRangeRequest {
                start_date: start,
                end_date: end,
                user_id: assignee,
            })
            .send()
            .await
            .context("Failed to connect to server")?;

        let body: SetRangeResponse = parse_response(resp).await?;
        Ok(body.previous)
    }

    /// GET /api/holidays?year=Y
    pub async fn holidays(&self, year: i32) -> Result<HolidayCalendar> {
        let resp = self
            .http
            .get(format!("{}/api/holidays", self.base_url))
            .query(&[("year", year)])
            .send()
            .await
            .context("Failed to connect to server")?;

        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status();
        let err: ErrorResponse = resp
            .json()
            .await
            .with_context(|| format!("Server returned {status}"))?;
        anyhow::bail!("{}", err.error);
    }

    Ok(resp.json().await?)
}

fn start_server(port: u16) -> Result<Child> {
    Command::new("ferien-server")
        .arg("--port")
        .arg(port.to_string())
        .spawn()
        .context("Failed to start ferien-server. Is it installed?")
}
