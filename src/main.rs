mod config;
mod controllers;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::{DatabaseConfig, EnvironmentConfig};
use middleware::auth::auth_middleware;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚐 Camper Rental Backend");
    info!("========================");

    let config = EnvironmentConfig::default();

    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Datenbankverbindung fehlgeschlagen: {}", e);
            return Err(anyhow::anyhow!("Datenbankfehler: {}", e));
        }
    };
    info!("✅ Datenbank verbunden");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let cors = cors_middleware(&config.cors_origins);
    let app_state = AppState::new(pool, config);

    // Alles unter /api außer Login und Healthcheck verlangt ein JWT
    let protected = Router::new()
        .nest("/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/booking", routes::booking_routes::create_booking_router())
        .nest("/contract", routes::contract_routes::create_contract_router())
        .nest("/protocol", routes::protocol_routes::create_protocol_router())
        .nest("/template", routes::template_routes::create_template_router())
        .merge(routes::proxy_routes::create_proxy_router())
        .layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api", protected)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Server startet auf http://{}", addr);
    info!("🔍 Verfügbare Endpoints:");
    info!("   GET  /health - Healthcheck");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Mitarbeiter-Login");
    info!("🚐 Fahrzeuge:");
    info!("   POST /api/vehicle - Fahrzeug anlegen");
    info!("   GET  /api/vehicle - Fahrzeuge auflisten");
    info!("   GET  /api/vehicle/:id - Fahrzeug abrufen");
    info!("   PUT  /api/vehicle/:id - Fahrzeug aktualisieren");
    info!("   DELETE /api/vehicle/:id - Fahrzeug löschen");
    info!("📅 Buchungen:");
    info!("   POST /api/booking - Buchung anlegen");
    info!("   GET  /api/booking - Buchungen auflisten");
    info!("   GET  /api/booking/:id - Buchung abrufen");
    info!("   PUT  /api/booking/:id - Buchung aktualisieren");
    info!("   PATCH /api/booking/:id/status - Buchungsstatus wechseln");
    info!("   DELETE /api/booking/:id - Buchung löschen");
    info!("📄 Verträge:");
    info!("   POST /api/contract/from-booking/:booking_id - Vertrag aus Buchung erstellen");
    info!("   GET  /api/contract - Verträge auflisten");
    info!("   GET  /api/contract/:id - Vertrag abrufen");
    info!("   PUT  /api/contract/:id - Vertragsentwurf aktualisieren");
    info!("   POST /api/contract/:id/signature - Unterschrift anhängen");
    info!("   POST /api/contract/:id/pdf - PDF erzeugen und versenden");
    info!("   DELETE /api/contract/:id - Vertrag löschen");
    info!("📋 Protokolle:");
    info!("   POST /api/protocol/booking/:booking_id - Übergabe-/Rücknahmeprotokoll erfassen");
    info!("   GET  /api/protocol/booking/:booking_id - Protokolle einer Buchung");
    info!("   GET  /api/protocol/:id - Protokoll abrufen");
    info!("   POST /api/protocol/:id/pdf - Protokoll-PDF erzeugen");
    info!("   POST /api/protocol/cleaning/booking/:booking_id - Reinigungsprotokoll erfassen");
    info!("   GET  /api/protocol/cleaning/booking/:booking_id - Reinigungsprotokolle einer Buchung");
    info!("   GET  /api/protocol/cleaning/:id - Reinigungsprotokoll abrufen");
    info!("   POST /api/protocol/cleaning/:id/pdf - Reinigungsprotokoll-PDF erzeugen");
    info!("📝 Templates:");
    info!("   POST /api/template - Template anlegen");
    info!("   GET  /api/template - Templates auflisten");
    info!("   GET  /api/template/active - Aktives Template abrufen");
    info!("   POST /api/template/:id/activate - Template aktivieren");
    info!("🖼️ Proxy:");
    info!("   GET  /api/image-proxy?url= - Bild-Proxy für das Frontend");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server beendet");
    Ok(())
}

/// Einfacher Healthcheck
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Graceful Shutdown auf Ctrl+C bzw. SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C empfangen, Server fährt herunter...");
        },
        _ = terminate => {
            info!("🛑 SIGTERM empfangen, Server fährt herunter...");
        },
    }
}
