//! In-memory link store.

use crate::error::{LinkError, LinkResult};
use crate::link::{LinkId, LinkStatus, LinkUpdate, NewLink, ProtectedLink};
use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

/// Holds protected links in creation order.
#[derive(Debug, Clone, Default)]
pub struct LinkStore {
    links: Vec<ProtectedLink>,
}

impl LinkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an active link with zeroed counters.
    pub fn create(&mut self, new: NewLink) -> LinkResult<ProtectedLink> {
        let url = validate_url(&new.url)?;
        let title = validate_title(&new.title)?;

        let link = ProtectedLink {
            id: LinkId::new(),
            url,
            title,
            clicks: 0,
            status: LinkStatus::Active,
            expiration_date: new.expiration_date,
            max_clicks: new.max_clicks,
            current_clicks: 0,
            created_at: Utc::now(),
        };
        debug!("Created protected link {} ({})", link.id, link.url);
        self.links.push(link.clone());
        Ok(link)
    }

    /// Applies a partial edit. Validation runs before anything is changed.
    pub fn update(&mut self, id: LinkId, update: LinkUpdate) -> LinkResult<ProtectedLink> {
        let url = update.url.as_deref().map(validate_url).transpose()?;
        let title = update.title.as_deref().map(validate_title).transpose()?;

        let link = self.find_mut(id)?;
        if let Some(url) = url {
            link.url = url;
        }
        if let Some(title) = title {
            link.title = title;
        }
        if let Some(status) = update.status {
            link.status = status;
        }
        if let Some(expiration_date) = update.expiration_date {
            link.expiration_date = expiration_date;
        }
        if let Some(max_clicks) = update.max_clicks {
            link.max_clicks = max_clicks;
        }
        Ok(link.clone())
    }

    pub fn delete(&mut self, id: LinkId) -> LinkResult<ProtectedLink> {
        let index = self
            .links
            .iter()
            .position(|l| l.id == id)
            .ok_or(LinkError::NotFound(id))?;
        debug!("Deleted protected link {}", id);
        Ok(self.links.remove(index))
    }

    /// Flips `Active ⇄ Paused`. Nothing but `status` changes.
    pub fn toggle_status(&mut self, id: LinkId) -> LinkResult<LinkStatus> {
        let link = self.find_mut(id)?;
        let next = link.status.toggled().ok_or(LinkError::Expired(id))?;
        link.status = next;
        Ok(next)
    }

    /// Counts a visit on an active link.
    pub fn record_click(&mut self, id: LinkId) -> LinkResult<&ProtectedLink> {
        let link = self.find_mut(id)?;
        if link.status != LinkStatus::Active {
            return Err(LinkError::NotActive(id));
        }
        link.clicks += 1;
        link.current_clicks += 1;
        Ok(link)
    }

    /// Lists links past their expiration date or click limit that are not
    /// yet marked expired. No link is modified.
    #[must_use]
    pub fn expired_candidates(&self, now: DateTime<Utc>) -> Vec<LinkId> {
        self.links
            .iter()
            .filter(|l| l.status != LinkStatus::Expired && l.is_past_limits(now))
            .map(|l| l.id)
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: LinkId) -> Option<&ProtectedLink> {
        self.links.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn list(&self) -> &[ProtectedLink] {
        &self.links
    }

    pub fn filter_by_status(&self, status: LinkStatus) -> impl Iterator<Item = &ProtectedLink> {
        self.links.iter().filter(move |l| l.status == status)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn find_mut(&mut self, id: LinkId) -> LinkResult<&mut ProtectedLink> {
        self.links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(LinkError::NotFound(id))
    }
}

fn validate_url(raw: &str) -> LinkResult<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| LinkError::InvalidUrl(format!("{trimmed}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(LinkError::InvalidUrl(format!(
            "{trimmed}: unsupported scheme {other}"
        ))),
    }
}

fn validate_title(raw: &str) -> LinkResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LinkError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
