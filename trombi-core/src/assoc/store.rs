use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::domain::{PhotoId, PhotoMapping};

/// Person -> mapping, plus the reverse photo -> person index. Both sides are
/// updated together so a photo is never bound to two people.
#[derive(Clone, Debug, Default)]
pub struct AssociationStore {
    by_person: BTreeMap<u32, PhotoMapping>,
    by_photo: HashMap<PhotoId, u32>,
}

impl AssociationStore {
    /// Inserts `mapping` and hands back the stored value together with the
    /// mapping it replaced for the same person.
    pub fn upsert(&mut self, mapping: PhotoMapping) -> (&PhotoMapping, Option<PhotoMapping>) {
        let person_id = mapping.person.id;
        let photo_id = mapping.photo_id;
        // A photo moving to another person leaves its previous owner empty.
        if let Some(prev_owner) = self.by_photo.insert(photo_id, person_id) {
            if prev_owner != person_id {
                self.by_person.remove(&prev_owner);
            }
        }
        if let Some(old_photo) = self.by_person.get(&person_id).map(|m| m.photo_id) {
            if old_photo != photo_id {
                self.by_photo.remove(&old_photo);
            }
        }
        match self.by_person.entry(person_id) {
            Entry::Occupied(mut o) => {
                let old = o.insert(mapping);
                (o.into_mut(), Some(old))
            }
            Entry::Vacant(v) => (v.insert(mapping), None),
        }
    }

    pub fn remove(&mut self, person_id: u32) -> Option<PhotoMapping> {
        let m = self.by_person.remove(&person_id)?;
        self.by_photo.remove(&m.photo_id);
        Some(m)
    }

    pub fn get(&self, person_id: u32) -> Option<&PhotoMapping> {
        self.by_person.get(&person_id)
    }

    pub fn person_for(&self, photo: PhotoId) -> Option<u32> {
        self.by_photo.get(&photo).copied()
    }

    pub fn contains_person(&self, person_id: u32) -> bool {
        self.by_person.contains_key(&person_id)
    }

    /// Mappings ordered by person id.
    pub fn iter(&self) -> impl Iterator<Item = &PhotoMapping> {
        self.by_person.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PhotoMapping> {
        self.by_person.values_mut()
    }

    /// Empties the store, handing back every mapping in person order.
    pub fn drain(&mut self) -> Vec<PhotoMapping> {
        self.by_photo.clear();
        std::mem::take(&mut self.by_person).into_values().collect()
    }
}
