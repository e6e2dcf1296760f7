use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{HeroGateway, HeroGatewayError};
use crate::domain::{Hero, HeroId, HeroPayload, Superpower, SuperpowerId};

/// Gateway method without its arguments, used to script failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOperation {
    /// `list_heroes`.
    ListHeroes,
    /// `get_hero`.
    GetHero,
    /// `create_hero`.
    CreateHero,
    /// `update_hero`.
    UpdateHero,
    /// `delete_hero`.
    DeleteHero,
    /// `list_superpowers`.
    ListSuperpowers,
}

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    /// The hero list was requested.
    ListHeroes,
    /// One hero was fetched.
    GetHero(HeroId),
    /// A create was sent with this payload.
    CreateHero(HeroPayload),
    /// An update of the hero was sent with this payload.
    UpdateHero(HeroId, HeroPayload),
    /// A delete was sent for the hero.
    DeleteHero(HeroId),
    /// The superpower catalogue was requested.
    ListSuperpowers,
}

impl GatewayCall {
    /// Operation this call belongs to.
    pub const fn operation(&self) -> GatewayOperation {
        match self {
            Self::ListHeroes => GatewayOperation::ListHeroes,
            Self::GetHero(_) => GatewayOperation::GetHero,
            Self::CreateHero(_) => GatewayOperation::CreateHero,
            Self::UpdateHero(..) => GatewayOperation::UpdateHero,
            Self::DeleteHero(_) => GatewayOperation::DeleteHero,
            Self::ListSuperpowers => GatewayOperation::ListSuperpowers,
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    heroes: Vec<Hero>,
    superpowers: Vec<Superpower>,
    next_id: i64,
    failures: VecDeque<(GatewayOperation, HeroGatewayError)>,
    calls: Vec<GatewayCall>,
}

impl Store {
    fn take_failure(&mut self, operation: GatewayOperation) -> Result<(), HeroGatewayError> {
        match self
            .failures
            .iter()
            .position(|(scripted, _)| *scripted == operation)
            .and_then(|index| self.failures.remove(index))
        {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }

    fn expand(&self, ids: &[SuperpowerId]) -> Vec<Superpower> {
        ids.iter()
            .filter_map(|id| self.superpowers.iter().find(|power| power.id == *id))
            .cloned()
            .collect()
    }

    fn hero_from(&self, id: HeroId, payload: &HeroPayload) -> Hero {
        Hero {
            id: Some(id),
            name: payload.name.clone(),
            hero_name: payload.hero_name.clone(),
            birth_date: payload.birth_date,
            height: payload.height,
            weight: payload.weight,
            superpower_ids: payload.superpower_ids.clone(),
            superpowers: Some(self.expand(&payload.superpower_ids)),
        }
    }

    fn position(&self, id: HeroId) -> Result<usize, HeroGatewayError> {
        self.heroes
            .iter()
            .position(|hero| hero.id == Some(id))
            .ok_or_else(|| HeroGatewayError::status(404_u16, format!("hero {id} not found")))
    }
}

/// Hero backend kept in memory, with scripted failures and a call log.
#[derive(Debug, Default)]
pub struct InMemoryHeroGateway {
    store: Mutex<Store>,
}

impl InMemoryHeroGateway {
    /// Backend seeded with a catalogue and no heroes.
    pub fn with_superpowers(superpowers: Vec<Superpower>) -> Self {
        Self {
            store: Mutex::new(Store {
                superpowers,
                next_id: 1,
                ..Store::default()
            }),
        }
    }

    /// Store `heroes` as-is and continue numbering after the largest id.
    #[must_use]
    pub fn with_heroes(self, heroes: Vec<Hero>) -> Self {
        {
            let mut store = self.lock();
            let max_id = heroes
                .iter()
                .filter_map(|hero| hero.id.map(HeroId::get))
                .max()
                .unwrap_or(0);
            store.next_id = store.next_id.max(max_id + 1);
            store.heroes = heroes;
        }
        self
    }

    /// Make the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: GatewayOperation, error: HeroGatewayError) {
        self.lock().failures.push_back((operation, error));
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    /// Number of calls of `operation` received so far.
    pub fn count(&self, operation: GatewayOperation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Heroes currently stored.
    pub fn stored_heroes(&self) -> Vec<Hero> {
        self.lock().heroes.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("in-memory gateway mutex"),
        }
    }
}

#[async_trait]
impl HeroGateway for InMemoryHeroGateway {
    async fn list_heroes(&self) -> Result<Vec<Hero>, HeroGatewayError> {
        let mut store = self.lock();
        store.calls.push(GatewayCall::ListHeroes);
        store.take_failure(GatewayOperation::ListHeroes)?;
        Ok(store.heroes.clone())
    }

    async fn get_hero(&self, id: HeroId) -> Result<Hero, HeroGatewayError> {
        let mut store = self.lock();
        store.calls.push(GatewayCall::GetHero(id));
        store.take_failure(GatewayOperation::GetHero)?;
        let index = store.position(id)?;
        Ok(store.heroes[index].clone())
    }

    async fn create_hero(&self, payload: &HeroPayload) -> Result<Hero, HeroGatewayError> {
        let mut store = self.lock();
        store.calls.push(GatewayCall::CreateHero(payload.clone()));
        store.take_failure(GatewayOperation::CreateHero)?;
        let id = HeroId::new(store.next_id.max(1));
        store.next_id = id.get() + 1;
        let hero = store.hero_from(id, payload);
        store.heroes.push(hero.clone());
        Ok(hero)
    }

    async fn update_hero(
        &self,
        id: HeroId,
        payload: &HeroPayload,
    ) -> Result<Hero, HeroGatewayError> {
        let mut store = self.lock();
        store.calls.push(GatewayCall::UpdateHero(id, payload.clone()));
        store.take_failure(GatewayOperation::UpdateHero)?;
        let index = store.position(id)?;
        let hero = store.hero_from(id, payload);
        store.heroes[index] = hero.clone();
        Ok(hero)
    }

    async fn delete_hero(&self, id: HeroId) -> Result<(), HeroGatewayError> {
        let mut store = self.lock();
        store.calls.push(GatewayCall::DeleteHero(id));
        store.take_failure(GatewayOperation::DeleteHero)?;
        let index = store.position(id)?;
        store.heroes.remove(index);
        Ok(())
    }

    async fn list_superpowers(&self) -> Result<Vec<Superpower>, HeroGatewayError> {
        let mut store = self.lock();
        store.calls.push(GatewayCall::ListSuperpowers);
        store.take_failure(GatewayOperation::ListSuperpowers)?;
        Ok(store.superpowers.clone())
    }
}
