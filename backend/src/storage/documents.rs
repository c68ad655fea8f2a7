//! [`Document`] implementations for the entity types.

use chrono::{DateTime, Utc};
use shared::{AiInsight, CarePlan, Child, HealthRecord, Parent, Reminder};

use super::{Collection, Document};

impl Document for Child {
    const COLLECTION: Collection = Collection::Children;

    fn id(&self) -> &str {
        &self.id
    }

    fn child_id(&self) -> Option<&str> {
        None
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Document for Parent {
    const COLLECTION: Collection = Collection::Parents;

    fn id(&self) -> &str {
        &self.id
    }

    fn child_id(&self) -> Option<&str> {
        None
    }
}

impl Document for HealthRecord {
    const COLLECTION: Collection = Collection::HealthRecords;

    fn id(&self) -> &str {
        &self.id
    }

    fn child_id(&self) -> Option<&str> {
        Some(&self.child_id)
    }
}

impl Document for Reminder {
    const COLLECTION: Collection = Collection::Reminders;

    fn id(&self) -> &str {
        &self.id
    }

    fn child_id(&self) -> Option<&str> {
        Some(&self.child_id)
    }
}

impl Document for CarePlan {
    const COLLECTION: Collection = Collection::CarePlans;

    fn id(&self) -> &str {
        &self.id
    }

    fn child_id(&self) -> Option<&str> {
        Some(&self.child_id)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Document for AiInsight {
    const COLLECTION: Collection = Collection::AiInsights;

    fn id(&self) -> &str {
        &self.id
    }

    fn child_id(&self) -> Option<&str> {
        Some(&self.child_id)
    }
}
