//! In-memory photographic report store.

use photoreport_core::{DomainResult, Entity, PhotoReport, ReportId, ReportPatch, UserId};
use tracing::info;

use crate::read_model::{EntityStore, InMemoryEntityStore};

#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: InMemoryEntityStore<PhotoReport>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, report: PhotoReport) -> DomainResult<PhotoReport> {
        self.reports.insert(report.clone())?;
        info!(report_id = %report.id, user_id = %report.user_id, "report created");
        Ok(report)
    }

    pub fn get(&self, id: &ReportId) -> DomainResult<PhotoReport> {
        self.reports.get(id)?.ok_or_else(|| PhotoReport::not_found(id))
    }

    /// Oldest first.
    pub fn list(&self) -> DomainResult<Vec<PhotoReport>> {
        let mut reports = self.reports.list()?;
        reports.sort_by_key(|r| r.created);
        Ok(reports)
    }

    pub fn list_by_user(&self, user_id: &UserId) -> DomainResult<Vec<PhotoReport>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| &r.user_id == user_id)
            .collect())
    }

    pub fn count(&self) -> DomainResult<usize> {
        self.reports.count()
    }

    pub fn update(&self, id: &ReportId, patch: ReportPatch) -> DomainResult<PhotoReport> {
        let mut report = self.get(id)?;
        report.apply(patch);
        self.reports.upsert(report.clone())?;
        Ok(report)
    }

    pub fn delete(&self, id: &ReportId) -> DomainResult<()> {
        self.reports.remove(id)?.ok_or_else(|| PhotoReport::not_found(id))?;
        info!(report_id = %id, "report deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use photoreport_core::DomainError;

    use super::*;

    #[test]
    fn list_by_user_filters_and_orders() {
        let store = InMemoryReportStore::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let t0 = Utc::now();

        let later = store
            .create(PhotoReport::new(alice, "b", "p", "ftp://b", t0 + Duration::seconds(5)))
            .unwrap();
        let earlier = store.create(PhotoReport::new(alice, "a", "p", "ftp://a", t0)).unwrap();
        store.create(PhotoReport::new(bob, "c", "p", "ftp://c", t0)).unwrap();

        let mine: Vec<_> = store.list_by_user(&alice).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(mine, vec![earlier.id, later.id]);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn update_and_delete_missing_report_fail() {
        let store = InMemoryReportStore::new();
        let id = ReportId::new();
        assert!(matches!(store.update(&id, ReportPatch::default()), Err(DomainError::NotFound(_))));
        assert!(matches!(store.delete(&id), Err(DomainError::NotFound(_))));
    }
}
