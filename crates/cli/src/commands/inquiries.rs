use anyhow::{Result, bail};
use serde_json::json;
use valora_core::InquiryId;
use valora_service::InquiryService;

use crate::open_storage;

async fn service() -> Result<InquiryService> {
    Ok(InquiryService::new(open_storage().await?))
}

pub(crate) async fn list(limit: usize) -> Result<()> {
    let inquiries = service().await?.list(limit).await?;
    println!("{}", serde_json::to_string_pretty(&inquiries)?);
    Ok(())
}

pub(crate) async fn show(id: InquiryId) -> Result<()> {
    let service = service().await?;
    let Some(results) = service.results(id).await? else {
        bail!("Inquiry not found: {id}");
    };
    let logs = service.logs(id).await?;
    let body = json!({
        "inquiry": results.inquiry,
        "estimate": results.estimate.as_ref().map(valora_core::Estimate::summary),
        "logs": logs,
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

pub(crate) async fn delete(id: InquiryId) -> Result<()> {
    let deleted = service().await?.delete(id).await?;
    if deleted {
        tracing::info!(inquiry_id = id, "inquiry deleted");
    }
    println!("{}", json!({"id": id, "deleted": deleted}));
    Ok(())
}
