use tracing::{debug, info, warn};

use crate::assoc::matcher::find_match;
use crate::assoc::store::AssociationStore;
use crate::domain::{Person, PhotoId, PhotoMapping, PoolEntry};
use crate::error::{Result, TrombiError};
use crate::naming::canonical_file_name;
use crate::photo::preview::preview;
use crate::photo::source::Photo;
use crate::policy::{AssociationPolicy, MatchEligibility, ReassignPolicy};

/// Outcome of one auto-match pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// (photo, person id) pairs bound by this pass, in pool order.
    pub matched: Vec<(PhotoId, u32)>,
    /// Photos still unassigned afterwards.
    pub remaining: usize,
}

impl MatchReport {
    pub fn count(&self) -> usize {
        self.matched.len()
    }
}

/// Working state of one photo-naming session: the people from the spreadsheet,
/// the photos nobody has yet and the committed associations.
#[derive(Debug, Default)]
pub struct AssociationEngine {
    persons: Vec<Person>,
    pool: Vec<PoolEntry>,
    store: AssociationStore,
    policy: AssociationPolicy,
    next_photo: u64,
}

impl AssociationEngine {
    pub fn new(policy: AssociationPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn with_persons(persons: Vec<Person>, policy: AssociationPolicy) -> Self {
        let mut engine = Self::new(policy);
        engine.persons = persons;
        engine
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn person(&self, id: u32) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub fn unassigned(&self) -> &[PoolEntry] {
        &self.pool
    }

    /// Mappings ordered by person id.
    pub fn mappings(&self) -> Vec<&PhotoMapping> {
        self.store.iter().collect()
    }

    pub fn mapping_for(&self, person_id: u32) -> Option<&PhotoMapping> {
        self.store.get(person_id)
    }

    pub fn person_for(&self, photo: PhotoId) -> Option<&Person> {
        self.store.person_for(photo).and_then(|id| self.person(id))
    }

    /// Replaces the person list. Ids from the previous load no longer mean
    /// anything, so every current mapping is undone and its photo pooled again.
    pub fn load_persons(&mut self, persons: Vec<Person>) {
        for m in self.store.drain() {
            self.pool.push(PoolEntry {
                id: m.photo_id,
                photo: m.photo,
            });
        }
        info!(count = persons.len(), "person list replaced");
        self.persons = persons;
    }

    fn issue_id(&mut self) -> PhotoId {
        let id = PhotoId(self.next_photo);
        self.next_photo += 1;
        id
    }

    pub fn add_photo(&mut self, photo: Photo) -> PhotoId {
        let id = self.issue_id();
        debug!(%id, name = photo.name(), "photo pooled");
        self.pool.push(PoolEntry { id, photo });
        id
    }

    pub fn add_photos(&mut self, photos: impl IntoIterator<Item = Photo>) -> Vec<PhotoId> {
        photos.into_iter().map(|p| self.add_photo(p)).collect()
    }

    /// Index in the pool of the first photo called `name`.
    pub fn pool_index_of(&self, name: &str) -> Option<usize> {
        self.pool.iter().position(|e| e.photo.name() == name)
    }

    fn build_mapping(person: &Person, id: PhotoId, photo: Photo) -> Result<PhotoMapping> {
        let photo_preview = preview(&photo)?;
        Ok(PhotoMapping {
            file_name: canonical_file_name(person, photo.name()),
            person: person.clone(),
            photo_id: id,
            photo,
            photo_preview,
        })
    }

    fn commit(&mut self, mapping: PhotoMapping) -> &PhotoMapping {
        let person_id = mapping.person.id;
        debug!(person = person_id, file = %mapping.file_name, "photo assigned");
        let (current, displaced) = self.store.upsert(mapping);
        if let Some(old) = displaced {
            match self.policy.on_reassign {
                ReassignPolicy::Discard => {
                    debug!(person = person_id, photo = %old.photo_id, "displaced photo discarded");
                }
                ReassignPolicy::ReturnToPool => {
                    debug!(person = person_id, photo = %old.photo_id, "displaced photo pooled");
                    self.pool.push(PoolEntry {
                        id: old.photo_id,
                        photo: old.photo,
                    });
                }
            }
        }
        current
    }

    /// Binds the pooled photo at `photo_index` to `person_id`. Nothing changes
    /// unless both exist and the photo can be read.
    pub fn assign(&mut self, photo_index: usize, person_id: u32) -> Result<&PhotoMapping> {
        let person = self
            .person(person_id)
            .cloned()
            .ok_or(TrombiError::UnknownPerson(person_id))?;
        let entry = self
            .pool
            .get(photo_index)
            .ok_or(TrombiError::PhotoIndexOutOfRange {
                index: photo_index,
                len: self.pool.len(),
            })?;
        let mapping = Self::build_mapping(&person, entry.id, entry.photo.clone())?;
        self.pool.remove(photo_index);
        Ok(self.commit(mapping))
    }

    /// Binds a photo that never went through the pool (one person at a time).
    pub fn attach(&mut self, photo: Photo, person_id: u32) -> Result<&PhotoMapping> {
        let person = self
            .person(person_id)
            .cloned()
            .ok_or(TrombiError::UnknownPerson(person_id))?;
        let id = PhotoId(self.next_photo);
        let mapping = Self::build_mapping(&person, id, photo)?;
        self.next_photo += 1;
        Ok(self.commit(mapping))
    }

    /// Tries every pooled photo against the persons, in id order. A photo goes
    /// to the first person whose first and last name, or whose reference,
    /// appears in its file name; `policy.auto_match` says who may take one.
    pub fn auto_match(&mut self) -> Result<MatchReport> {
        if self.pool.is_empty() || self.persons.is_empty() {
            warn!(
                photos = self.pool.len(),
                persons = self.persons.len(),
                "auto-match skipped"
            );
            return Err(TrombiError::NothingToMatch {
                photos: self.pool.len(),
                persons: self.persons.len(),
            });
        }

        // Read every preview first so a failing file leaves the state untouched.
        let mut taken: Vec<u32> = Vec::new();
        let mut planned: Vec<(usize, PhotoMapping)> = Vec::new();
        for (index, entry) in self.pool.iter().enumerate() {
            let store = &self.store;
            let hit = find_match(&self.persons, entry.photo.name(), |p| {
                match self.policy.auto_match {
                    MatchEligibility::Unassigned => {
                        !store.contains_person(p.id) && !taken.contains(&p.id)
                    }
                    MatchEligibility::AnyPerson => true,
                }
            });
            if let Some(person) = hit {
                taken.push(person.id);
                planned.push((
                    index,
                    Self::build_mapping(person, entry.id, entry.photo.clone())?,
                ));
            }
        }

        for (index, _) in planned.iter().rev() {
            self.pool.remove(*index);
        }
        let mut report = MatchReport::default();
        for (_, mapping) in planned {
            report.matched.push((mapping.photo_id, mapping.person.id));
            self.commit(mapping);
        }
        report.remaining = self.pool.len();
        info!(
            matched = report.count(),
            remaining = report.remaining,
            "auto-match done"
        );
        Ok(report)
    }

    /// Undoes the association of `person_id`; its photo goes back to the pool.
    pub fn remove(&mut self, person_id: u32) -> Result<PhotoId> {
        let m = self
            .store
            .remove(person_id)
            .ok_or(TrombiError::NotMapped(person_id))?;
        debug!(person = person_id, photo = %m.photo_id, "association removed");
        self.pool.push(PoolEntry {
            id: m.photo_id,
            photo: m.photo,
        });
        Ok(m.photo_id)
    }

    /// Re-derives every mapping's file name; returns how many changed.
    pub fn regenerate_file_names(&mut self) -> usize {
        let mut changed = 0;
        for m in self.store.iter_mut() {
            let name = canonical_file_name(&m.person, m.photo.name());
            if name != m.file_name {
                m.file_name = name;
                changed += 1;
            }
        }
        changed
    }
}
