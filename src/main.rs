use std::env;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use order_scanner::domain::order::{OrderStatus, PayType};
use order_scanner::{
    BackendClient, CaptureConfig, CapturePipeline, ImageDirSource, Notice, OrderDraft,
    OrderService, RqrrDecoder, Settings, SettingsService,
};
use tokio::sync::mpsc;

/// Dev harness: replays a directory of frames through the scan-to-cart
/// pipeline against a running backend, then optionally submits the cart.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let frame_dir = env::var("FRAME_DIR").expect("FRAME_DIR must point at a directory of frames");

    let mut settings = Settings::default();
    if let Ok(url) = env::var("BACKEND_URL") {
        settings.backend_base_url = url;
    }
    if let Ok(zoom) = env::var("ZOOM_FACTOR") {
        settings.zoom_factor = zoom.parse().expect("ZOOM_FACTOR must be a number");
    }
    let settings = SettingsService::new(settings);
    let current = settings.current();

    log::info!(
        "scanning {} against {}",
        frame_dir,
        current.backend_base_url
    );

    let backend = Arc::new(BackendClient::new(&current.backend_base_url)?);
    let mut draft = OrderDraft::new();
    draft.begin_scanning();

    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel::<Notice>();
    let notice_task = tokio::spawn(async move {
        while let Some(notice) = notice_rx.recv().await {
            log::warn!("{notice}");
        }
    });

    let pipeline = CapturePipeline::start(
        ImageDirSource::new(&frame_dir),
        RqrrDecoder,
        backend.clone(),
        draft.cart(),
        notice_tx,
        CaptureConfig::from_settings(&current),
    )
    .await?;

    pipeline.wait().await;
    // Lookups spawned on the last frames may still be landing.
    tokio::time::sleep(Duration::from_millis(500)).await;
    draft.sync_with_cart().await;

    {
        let cart = draft.cart();
        let cart = cart.lock().await;
        for line in cart.lines() {
            log::info!(
                "{} x{} @ {} ({})",
                line.title,
                line.quantity,
                line.unit_price,
                line.sku
            );
        }
        log::info!("cart total: {}", cart.total());
    }

    draft.client.name = env::var("CLIENT_NAME").unwrap_or_default();
    draft.client.phone = env::var("CLIENT_PHONE").unwrap_or_default();

    if draft.client.name.is_empty() || draft.client.phone.is_empty() {
        log::info!("CLIENT_NAME / CLIENT_PHONE not set, leaving the cart unsubmitted");
    } else {
        let orders = OrderService::new(backend);
        match orders
            .submit(&mut draft, OrderStatus::Pending, PayType::Cash)
            .await
        {
            Ok(order_id) => log::info!("created order {order_id}"),
            Err(e) => log::error!("{}", Notice::from(e)),
        }
    }

    let _ = notice_task.await;
    Ok(())
}
