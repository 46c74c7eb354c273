use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use stationtrade_ledger::ItemId;
use tracing::{debug, warn};

use super::{LookupError, MarketSnapshot, PriceLookup};
use crate::config::AppConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};

const ESI_BASE_URL: &str = "https://esi.evetech.net/latest";

/// Region order book adapter for the public ESI market endpoint.
///
/// One GET per lookup; only orders located at the configured station count.
#[derive(Clone)]
pub struct EsiMarketSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    region_id: u64,
    station_id: u64,
    timeout_ms: u64,
}

impl EsiMarketSource {
    pub fn new(http_client: Arc<dyn HttpClient>, region_id: u64, station_id: u64) -> Self {
        Self {
            http_client,
            base_url: String::from(ESI_BASE_URL),
            region_id,
            station_id,
            timeout_ms: 10_000,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(ReqwestHttpClient::new()),
            config.region_id,
            config.station_id,
        )
        .with_timeout_ms(config.timeout_ms)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn orders_url(&self, item_id: ItemId) -> String {
        format!(
            "{}/markets/{}/orders?datasource=tranquility&order_type=all&type_id={}",
            self.base_url.trim_end_matches('/'),
            self.region_id,
            item_id
        )
    }

    async fn fetch_snapshot(&self, item_id: ItemId) -> Result<MarketSnapshot, LookupError> {
        let request = HttpRequest::get(self.orders_url(item_id))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        debug!(url = %request.url, "requesting region orders");
        let response = self.http_client.execute(request).await.map_err(|e| {
            warn!(%item_id, error = %e, "esi transport error");
            LookupError::upstream(format!("esi transport error: {}", e.message()))
        })?;

        if !response.is_success() {
            warn!(%item_id, status = response.status, "esi returned non-success status");
            return Err(LookupError::upstream(format!(
                "esi returned status {}",
                response.status
            )));
        }

        let orders: Vec<EsiOrder> = serde_json::from_str(&response.body)
            .map_err(|e| LookupError::decode(format!("failed to parse esi orders: {e}")))?;

        let snapshot = aggregate(&orders, self.station_id);
        debug!(
            %item_id,
            orders = orders.len(),
            highest_buy = ?snapshot.highest_buy,
            lowest_sell = ?snapshot.lowest_sell,
            "region orders aggregated"
        );
        Ok(snapshot)
    }
}

impl PriceLookup for EsiMarketSource {
    fn snapshot<'a>(
        &'a self,
        item_id: ItemId,
    ) -> Pin<Box<dyn Future<Output = Result<MarketSnapshot, LookupError>> + Send + 'a>> {
        Box::pin(self.fetch_snapshot(item_id))
    }
}

#[derive(Debug, Deserialize)]
struct EsiOrder {
    is_buy_order: bool,
    location_id: u64,
    price: f64,
    volume_remain: u64,
}

fn aggregate(orders: &[EsiOrder], station_id: u64) -> MarketSnapshot {
    let mut snapshot = MarketSnapshot::empty();

    for order in orders.iter().filter(|order| order.location_id == station_id) {
        if order.is_buy_order {
            snapshot.highest_buy = Some(
                snapshot
                    .highest_buy
                    .map_or(order.price, |best| best.max(order.price)),
            );
            snapshot.buy_volume += order.volume_remain;
        } else {
            snapshot.lowest_sell = Some(
                snapshot
                    .lowest_sell
                    .map_or(order.price, |best| best.min(order.price)),
            );
            snapshot.sell_volume += order.volume_remain;
        }
    }

    snapshot
}
