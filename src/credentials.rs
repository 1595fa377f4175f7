//! Records from the backend and the in-memory cache the shell works from.
//!
//! The [`Vault`] holds whatever the last list call returned. It is only a
//! cache for lookup and completion: every change goes to the backend first.

/// A stored password. `created_at` is kept exactly as the backend formats it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRecord {
    pub id: u64,
    pub platform: String,
    pub email: String,
    pub password: String,
    pub created_at: Option<String>,
}

/// Records from the last successful fetch.
#[derive(Debug, Default)]
pub struct Vault {
    records: Vec<PasswordRecord>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, records: Vec<PasswordRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[PasswordRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Adds a record, replacing any record with the same id.
    pub fn upsert(&mut self, record: PasswordRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Changes platform and password of record `id`. Returns false if it is not cached.
    pub fn update(&mut self, id: u64, platform: &str, password: &str) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.platform = platform.to_string();
                record.password = password.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<PasswordRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Case-insensitive substring match on platform or email.
    pub fn search(&self, query: &str) -> Vec<&PasswordRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.platform.to_lowercase().contains(&needle)
                    || r.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Finds a record by numeric id, else by platform name ignoring case.
    pub fn resolve(&self, key: &str) -> Result<&PasswordRecord, String> {
        if let Ok(id) = key.parse::<u64>() {
            if let Some(record) = self.records.iter().find(|r| r.id == id) {
                return Ok(record);
            }
        }

        let matches: Vec<&PasswordRecord> = self
            .records
            .iter()
            .filter(|r| r.platform.eq_ignore_ascii_case(key))
            .collect();

        match matches.as_slice() {
            [] => Err(format!("'{}' not found. Run 'list' to refresh.", key)),
            [record] => Ok(record),
            _ => Err(format!(
                "'{}' matches {} entries; use the id instead.",
                key,
                matches.len()
            )),
        }
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.platform.as_str())
    }
}
