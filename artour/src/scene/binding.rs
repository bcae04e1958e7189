//! Entity-to-POI binding and scene reconciliation

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::renderer::{EntityId, SceneRenderer};
use crate::poi::Poi;
use crate::slotter::{SlotAssignments, SLOT_COUNT};

/// Two-sided index between rendered entities and the POIs they display.
///
/// Both directions are maintained under one mutation API, so every
/// entity key has exactly one POI counterpart and vice versa at all
/// times.
#[derive(Debug, Default)]
struct EntityIndex {
    /// Entity -> the POI it displays.
    by_entity: HashMap<EntityId, Poi>,

    /// POI id -> the entity displaying it.
    by_poi: HashMap<String, EntityId>,
}

impl EntityIndex {
    fn bind(&mut self, poi: Poi, entity: EntityId) {
        self.by_poi.insert(poi.id.clone(), entity);
        self.by_entity.insert(entity, poi);
    }

    fn unbind_entity(&mut self, entity: EntityId) -> Option<Poi> {
        let poi = self.by_entity.remove(&entity)?;
        self.by_poi.remove(&poi.id);
        Some(poi)
    }

    fn unbind_poi(&mut self, poi_id: &str) -> Option<EntityId> {
        let entity = self.by_poi.remove(poi_id)?;
        self.by_entity.remove(&entity);
        Some(entity)
    }

    fn poi_for(&self, entity: EntityId) -> Option<&Poi> {
        self.by_entity.get(&entity)
    }

    fn entity_for(&self, poi_id: &str) -> Option<EntityId> {
        self.by_poi.get(poi_id).copied()
    }

    fn len(&self) -> usize {
        debug_assert_eq!(self.by_entity.len(), self.by_poi.len());
        self.by_entity.len()
    }
}

/// One slot's current binding: which POI it shows and the entity showing it.
#[derive(Debug, Clone)]
struct BoundSlot {
    poi_id: String,
    entity: EntityId,
}

/// Counts of scene mutations performed by one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Entities created and added this pass.
    pub added: usize,
    /// Entities removed this pass.
    pub removed: usize,
    /// Slots whose assignment was already current.
    pub unchanged: usize,
}

impl ReconcileSummary {
    /// True if the pass performed no scene mutations.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Reconciles slot assignments against the rendered scene.
///
/// Maintains the mapping between rendered entities and POI records and
/// mediates all add/remove operations against the rendering
/// collaborator. Slots whose assigned POI is unchanged are left
/// untouched, so repeated passes with the same assignments never
/// recreate entities.
pub struct SceneBinding {
    renderer: Arc<dyn SceneRenderer>,
    slots: [Option<BoundSlot>; SLOT_COUNT],
    index: EntityIndex,
}

impl SceneBinding {
    /// Create a binding mediating scene access through the given renderer.
    pub fn new(renderer: Arc<dyn SceneRenderer>) -> Self {
        Self {
            renderer,
            slots: Default::default(),
            index: EntityIndex::default(),
        }
    }

    /// Reconcile new slot assignments against the current scene.
    ///
    /// Per slot: an unchanged POI is left alone; a changed or vacated
    /// slot has its old entity removed; a newly assigned POI gets an
    /// entity created at its computed position, added to the scene and
    /// bound.
    pub fn reconcile(&mut self, assignments: &SlotAssignments) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        for (slot, assignment) in assignments.iter() {
            let current = &self.slots[slot];
            let unchanged = match (current, assignment) {
                (Some(bound), Some(a)) => bound.poi_id == a.poi.id,
                (None, None) => true,
                _ => false,
            };

            if unchanged {
                summary.unchanged += 1;
                continue;
            }

            if let Some(bound) = self.slots[slot].take() {
                self.renderer.remove_from_scene(bound.entity);
                self.index.unbind_entity(bound.entity);
                summary.removed += 1;
                debug!(slot, poi = %bound.poi_id, entity = %bound.entity, "Slot vacated");
            }

            if let Some(a) = assignment {
                let entity = self.renderer.create_entity(&a.position, &a.poi.label());
                self.renderer.add_to_scene(entity);
                self.index.bind(a.poi.clone(), entity);
                self.slots[slot] = Some(BoundSlot {
                    poi_id: a.poi.id.clone(),
                    entity,
                });
                summary.added += 1;
                debug!(slot, poi = %a.poi.id, entity = %entity, "Slot bound");
            }
        }

        summary
    }

    /// Resolve a tapped entity to the POI it displays.
    pub fn resolve_selection(&self, entity: EntityId) -> Option<Poi> {
        self.index.poi_for(entity).cloned()
    }

    /// Remove the entity currently displaying this POI, if any.
    ///
    /// The slot holding it becomes unassigned.
    pub fn remove(&mut self, poi_id: &str) -> bool {
        let Some(entity) = self.index.unbind_poi(poi_id) else {
            return false;
        };
        self.renderer.remove_from_scene(entity);

        for slot in self.slots.iter_mut() {
            if slot.as_ref().is_some_and(|b| b.poi_id == poi_id) {
                *slot = None;
            }
        }

        debug!(poi = %poi_id, entity = %entity, "POI removed from scene");
        true
    }

    /// The entity currently displaying a POI, if any.
    pub fn entity_for(&self, poi_id: &str) -> Option<EntityId> {
        self.index.entity_for(poi_id)
    }

    /// The POI bound to a slot, if any.
    pub fn poi_in_slot(&self, slot: usize) -> Option<&Poi> {
        let bound = self.slots.get(slot)?.as_ref()?;
        self.index.poi_for(bound.entity)
    }

    /// Number of entities currently bound (equals entities in the scene).
    pub fn bound_len(&self) -> usize {
        self.index.len()
    }
}
