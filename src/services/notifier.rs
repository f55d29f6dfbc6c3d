//! Kundenbenachrichtigung als Hintergrund-Task mit begrenzten Retries
//!
//! Die Zustellung läuft von der auslösenden Anfrage entkoppelt: der
//! Handler antwortet nach dem Speichern des Dokuments, der Versand
//! wird per `tokio::spawn` abgesetzt und meldet seinen Zustand über
//! einen `watch`-Kanal. At-least-once mit hartem Versuchslimit; ein
//! endgültiges Scheitern wird geloggt, rollt aber das bereits
//! gespeicherte Dokument nie zurück.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

/// Maximale Zustellversuche
pub const MAX_ATTEMPTS: u32 = 3;

/// Timeout je Versuch
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Feste Pause zwischen zwei Versuchen
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Beobachtbarer Zustand einer Zustellung
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Delivered { attempts: u32 },
    Failed { attempts: u32 },
}

/// Payload des ausgehenden Webhooks
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub customer_email: String,
    pub customer_name: String,
    pub booking_id: Uuid,
    pub contract_id: Option<Uuid>,
    pub contract_number: Option<String>,
    pub filename: String,
    /// Gerendertes Dokument, Base64-kodiert
    pub pdf_base64: String,
}

/// Transportschicht der Zustellung, austauschbar für Tests
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), String>;
}

/// Produktiver Transport: POST an den konfigurierten Webhook
pub struct HttpWebhookTransport {
    client: Client,
    webhook_url: String,
}

impl HttpWebhookTransport {
    pub fn new(webhook_url: String) -> Self {
        let client = Client::builder()
            .timeout(ATTEMPT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), String> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("Webhook nicht erreichbar: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("Webhook lieferte Status {}", response.status()))
        }
    }
}

/// Startet die Zustellung als eigenständigen Task.
///
/// Der Rückgabekanal erlaubt Beobachtung (und Tests); der Task selbst
/// hängt nicht am Lebenszyklus der auslösenden Anfrage.
pub fn spawn_notification(
    transport: Arc<dyn WebhookTransport>,
    payload: NotificationPayload,
) -> watch::Receiver<DeliveryStatus> {
    let (tx, rx) = watch::channel(DeliveryStatus::Pending);

    tokio::spawn(async move {
        let status = deliver_with_retry(transport.as_ref(), &payload).await;
        // Empfänger darf längst weggeworfen sein
        let _ = tx.send(status);
    });

    rx
}

/// Zustellschleife: bis zu MAX_ATTEMPTS Versuche mit fester Pause
pub async fn deliver_with_retry(
    transport: &dyn WebhookTransport,
    payload: &NotificationPayload,
) -> DeliveryStatus {
    for attempt in 1..=MAX_ATTEMPTS {
        log::info!(
            "📧 Zustellversuch {}/{} an {}",
            attempt,
            MAX_ATTEMPTS,
            payload.customer_email
        );

        match transport.send(payload).await {
            Ok(()) => {
                log::info!("✅ Benachrichtigung zugestellt an {}", payload.customer_email);
                return DeliveryStatus::Delivered { attempts: attempt };
            }
            Err(e) => {
                log::warn!("⚠️ Zustellversuch {} fehlgeschlagen: {}", attempt, e);
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    log::error!(
        "❌ Benachrichtigung an {} endgültig fehlgeschlagen nach {} Versuchen; \
         das gespeicherte Dokument bleibt gültig",
        payload.customer_email,
        MAX_ATTEMPTS
    );

    DeliveryStatus::Failed {
        attempts: MAX_ATTEMPTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingTransport {
        calls: AtomicU32,
        fail_first: u32,
    }

    impl CountingTransport {
        fn failing_always() -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_first: u32::MAX,
            }
        }

        fn failing_first(n: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_first: n,
            }
        }
    }

    #[async_trait]
    impl WebhookTransport for CountingTransport {
        async fn send(&self, _payload: &NotificationPayload) -> Result<(), String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.fail_first {
                Err("HTTP 500".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn payload() -> NotificationPayload {
        NotificationPayload {
            customer_email: "kunde@example.com".to_string(),
            customer_name: "Max Mustermann".to_string(),
            booking_id: Uuid::nil(),
            contract_id: None,
            contract_number: Some("WM-1".to_string()),
            filename: "Mietvertrag.pdf".to_string(),
            pdf_base64: "JVBERi0=".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failing_target_is_attempted_exactly_three_times() {
        let transport = CountingTransport::failing_always();

        let status = deliver_with_retry(&transport, &payload()).await;

        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
        assert_eq!(status, DeliveryStatus::Failed { attempts: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn delivery_succeeds_after_transient_failure() {
        let transport = CountingTransport::failing_first(1);

        let status = deliver_with_retry(&transport, &payload()).await;

        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(status, DeliveryStatus::Delivered { attempts: 2 });
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_task_reports_status_via_watch_channel() {
        let transport = Arc::new(CountingTransport::failing_always());

        let mut rx = spawn_notification(transport.clone(), payload());
        rx.wait_for(|status| *status != DeliveryStatus::Pending)
            .await
            .unwrap();

        assert_eq!(*rx.borrow(), DeliveryStatus::Failed { attempts: 3 });
        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
    }
}
