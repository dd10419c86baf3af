//! Authenticated connector for one target endpoint
//!
//! Every network-facing operation shares one error path: non-2xx responses
//! and transport failures are classified, logged once at error level and
//! returned unchanged. Successful bodies are decoded as JSON and handed back
//! without interpretation; only pagination bookkeeping and cloud-account
//! filtering look inside them.

use crate::classify::{classify_failure, classify_response};
use crate::config::ConnectorConfig;
use crate::search::SearchRequest;
use crate::transport::{HttpMethod, HttpRequest, ReqwestTransport, Transport};
use polcmp_core::errors::{PcError, PcErrorKind, Result};
use polcmp_core::{log_op_end, log_op_error, log_op_start};
use polcmp_core_types::RequestId;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

/// Item type tag used by AWS cloud account groups
const AWS_ACCOUNT_TYPE: &str = "aws-account";

pub struct Connector<T: Transport = ReqwestTransport> {
    config: ConnectorConfig,
    headers: Vec<(String, String)>,
    transport: T,
}

impl Connector<ReqwestTransport> {
    /// Build a connector backed by the blocking reqwest client
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: the HTTP client could not be built
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Connector<T> {
    pub fn with_transport(config: ConnectorConfig, transport: T) -> Self {
        let headers = config.headers();
        tracing::debug!(
            component = module_path!(),
            endpoint = config.endpoint().name(),
            base_url = config.base_url(),
            verify_tls = config.verify_tls(),
            "connector configured"
        );
        Self {
            config,
            headers,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `<base>/<path>`
    ///
    /// # Errors
    ///
    /// Any classified status or transport failure, or `InvalidResponse` when
    /// the body is not JSON.
    pub fn get(&self, path: &str) -> Result<Value> {
        self.send("get", HttpMethod::Get, path, None)
    }

    /// POST a JSON body to `<base>/<path>`
    ///
    /// # Errors
    ///
    /// Same as [`Connector::get`].
    pub fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.send("post", HttpMethod::Post, path, Some(body))
    }

    /// PATCH a JSON body to `<base>/<path>`
    ///
    /// # Errors
    ///
    /// Same as [`Connector::get`].
    pub fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.send("patch", HttpMethod::Patch, path, Some(body))
    }

    /// Fetch every item of a collection, keyed by ID
    ///
    /// Pages of up to 100 items are requested in ascending ID order, each
    /// starting after the last ID of the previous page, until a page comes
    /// back empty. Cloud-managed items are skipped. The cursor only moves
    /// forward if the server honours the sort order; a server that repeats
    /// IDs will keep this loop running.
    ///
    /// # Errors
    ///
    /// - any failure of the underlying search requests
    /// - `InvalidResponse`: the result key or an item's integer `ID` is missing
    pub fn list_all(&self, endpoint: &str, result_key: &str) -> Result<BTreeMap<u64, Value>> {
        let started = Instant::now();
        log_op_start!("list_all", path = endpoint);

        let search_path = search_path(endpoint);
        let mut items = BTreeMap::new();
        let mut cursor = 0u64;
        let mut skipped = 0u64;

        loop {
            let response = self.post(&search_path, &SearchRequest::page_after(cursor).to_value())?;
            let page = result_items(&response, result_key)
                .map_err(|e| fail("list_all", e.with_path(search_path.as_str()), started))?;
            if page.is_empty() {
                break;
            }

            let mut last_id = cursor;
            for item in page {
                let id = item_id(item)
                    .map_err(|e| fail("list_all", e.with_path(search_path.as_str()), started))?;
                last_id = id;
                if is_cloud_managed(item) {
                    skipped += 1;
                    continue;
                }
                items.insert(id, item.clone());
            }

            tracing::debug!(
                component = module_path!(),
                op = "list_all",
                path = endpoint,
                cursor,
                page_len = page.len() as u64,
                "fetched page"
            );
            cursor = last_id;
        }

        log_op_end!(
            "list_all",
            duration_ms = elapsed_ms(started),
            path = endpoint,
            item_count = items.len() as u64,
            skipped_count = skipped
        );
        Ok(items)
    }

    /// Resolve the ID of the single item named `name`
    ///
    /// At most two items are requested: enough to tell a unique match from
    /// a duplicate without listing the collection.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no item has that name (under `parent_id`, if given)
    /// - `AmbiguousName`: more than one item matched
    /// - `InvalidResponse`: result key or `ID` missing
    /// - any failure of the underlying search request
    pub fn find_by_name(
        &self,
        endpoint: &str,
        result_key: &str,
        name: &str,
        parent_id: Option<u64>,
    ) -> Result<u64> {
        let started = Instant::now();
        log_op_start!("find_by_name", path = endpoint, resource_name = name);

        let search_path = search_path(endpoint);
        let response = self.post(
            &search_path,
            &SearchRequest::by_name(name, parent_id).to_value(),
        )?;
        let matches = result_items(&response, result_key)
            .map_err(|e| fail("find_by_name", e.with_path(search_path.as_str()), started))?;

        match matches.len() {
            0 => Err(fail(
                "find_by_name",
                PcError::new(PcErrorKind::NotFound)
                    .with_path(search_path.as_str())
                    .with_message(format!("named resource not found: {}", name)),
                started,
            )),
            1 => {
                let id = item_id(&matches[0])
                    .map_err(|e| fail("find_by_name", e.with_path(search_path.as_str()), started))?;
                log_op_end!("find_by_name", duration_ms = elapsed_ms(started), id = id);
                Ok(id)
            }
            count => {
                let err = PcError::new(PcErrorKind::AmbiguousName)
                    .with_op("find_by_name")
                    .with_path(search_path.as_str())
                    .with_message(format!("ambiguous name: {} matches for '{}'", count, name));
                tracing::warn!(
                    component = module_path!(),
                    op = "find_by_name",
                    event = polcmp_core_types::schema::EVENT_END_ERROR,
                    duration_ms = elapsed_ms(started),
                    path = search_path.as_str(),
                    err.code = err.code(),
                    count = count as u64,
                    "More than one item matched name '{}'",
                    name
                );
                Err(err)
            }
        }
    }

    fn send(
        &self,
        op: &'static str,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let started = Instant::now();
        let request_id = RequestId::new();
        let request = HttpRequest {
            method,
            url: self.url_for(path),
            headers: &self.headers,
            body: body.map(Value::to_string),
        };

        tracing::debug!(
            component = module_path!(),
            op,
            request_id = request_id.as_str(),
            method = method.as_str(),
            path,
            "sending request"
        );

        let outcome = match self.transport.send(&request) {
            Err(failure) => Err(classify_failure(&failure)),
            Ok(response) => match classify_response(&response) {
                Some(err) => Err(err),
                None => {
                    tracing::debug!(
                        component = module_path!(),
                        op,
                        request_id = request_id.as_str(),
                        status = response.status,
                        duration_ms = elapsed_ms(started),
                        "received response"
                    );
                    decode_body(&response.body)
                }
            },
        };

        outcome.map_err(|err| {
            let err = err.with_op(op).with_path(path);
            log_op_error!(
                op,
                &err,
                duration_ms = elapsed_ms(started),
                path = path,
                request_id = request_id.as_str()
            );
            err
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path.trim_start_matches('/'))
    }
}

/// True for items created by a cloud-provider integration
pub fn is_cloud_managed(item: &Value) -> bool {
    let has_cloud_type = item.get("cloudType").is_some_and(|v| !v.is_null());
    let is_aws_account = item.get("type").and_then(Value::as_str) == Some(AWS_ACCOUNT_TYPE);
    has_cloud_type || is_aws_account
}

fn search_path(endpoint: &str) -> String {
    format!("{}/search", endpoint.trim_end_matches('/'))
}

fn result_items<'a>(response: &'a Value, result_key: &str) -> Result<&'a Vec<Value>> {
    response
        .get(result_key)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PcError::new(PcErrorKind::InvalidResponse).with_message(format!(
                "search response has no '{}' array",
                result_key
            ))
        })
}

fn item_id(item: &Value) -> Result<u64> {
    item.get("ID").and_then(Value::as_u64).ok_or_else(|| {
        PcError::new(PcErrorKind::InvalidResponse)
            .with_message("search result item has no integer 'ID'")
    })
}

fn decode_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| {
        PcError::new(PcErrorKind::InvalidResponse)
            .with_message(format!("response body is not valid JSON: {}", e))
    })
}

/// Log a locally detected failure once and hand it back
fn fail(op: &'static str, err: PcError, started: Instant) -> PcError {
    let err = err.with_op(op);
    log_op_error!(
        op,
        &err,
        duration_ms = elapsed_ms(started),
        path = err.path().unwrap_or_default()
    );
    err
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
