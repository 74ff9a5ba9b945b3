//! Gossip Directory: session-scoped реестр живых монстров
//!
//! Вместо O(n²) паутины signal подписок: одна коллекция, которой владеет
//! directory. Подписка `listener ← source` значит "listener получает
//! sightings от source". Инвариант после reconcile: каждая упорядоченная
//! пара (A, B), A ≠ B, подписана.

use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Результат одного reconcile прохода
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Сколько недостающих подписок создано
    pub linked: usize,
    /// Члены, которые больше не живы (удалены из directory)
    pub pruned: Vec<Entity>,
}

/// Resource: члены gossip сети + подписки
#[derive(Resource, Debug, Default)]
pub struct GossipDirectory {
    /// Порядок регистрации (детерминированный порядок fanout)
    members: Vec<Entity>,
    /// source → listeners (в порядке подписки)
    listeners: HashMap<Entity, Vec<Entity>>,
}

impl GossipDirectory {
    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, agent: Entity) -> bool {
        self.members.contains(&agent)
    }

    /// listener получает sightings от source
    pub fn is_subscribed(&self, listener: Entity, source: Entity) -> bool {
        self.listeners
            .get(&source)
            .is_some_and(|list| list.contains(&listener))
    }

    /// Добавить агента и подписать bidirectionally со всеми остальными
    ///
    /// Idempotent: повторная регистрация не создаёт дублей подписок.
    /// Возвращает true если агент новый.
    pub fn register(&mut self, agent: Entity) -> bool {
        let is_new = !self.contains(agent);
        if is_new {
            self.members.push(agent);
            self.listeners.entry(agent).or_default();
        }

        let peers: Vec<Entity> = self.members.iter().copied().filter(|&p| p != agent).collect();
        for peer in peers {
            self.subscribe(agent, peer);
            self.subscribe(peer, agent);
        }
        is_new
    }

    /// Убрать агента и все подписки с его участием
    pub fn unregister(&mut self, agent: Entity) -> bool {
        let Some(index) = self.members.iter().position(|&m| m == agent) else {
            return false;
        };
        self.members.remove(index);
        self.listeners.remove(&agent);
        for list in self.listeners.values_mut() {
            list.retain(|&l| l != agent);
        }
        true
    }

    /// Пары (listener, source) без подписки
    pub fn unconnected_pairs(&self) -> Vec<(Entity, Entity)> {
        let mut missing = Vec::new();
        for &source in &self.members {
            for &listener in &self.members {
                if listener != source && !self.is_subscribed(listener, source) {
                    missing.push((listener, source));
                }
            }
        }
        missing
    }

    pub fn is_converged(&self) -> bool {
        self.unconnected_pairs().is_empty()
    }

    /// Прогон reconciliation: prune мёртвых, link недостающих пар
    pub fn reconcile(&mut self, is_live: impl Fn(Entity) -> bool) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let dead: Vec<Entity> = self.members.iter().copied().filter(|&m| !is_live(m)).collect();
        for agent in dead {
            self.unregister(agent);
            report.pruned.push(agent);
        }

        for (listener, source) in self.unconnected_pairs() {
            if self.subscribe(listener, source) {
                report.linked += 1;
            }
        }
        report
    }

    /// Snapshot fanout для sighting от `origin`
    ///
    /// Список получателей фиксируется сейчас (listeners origin'а, в порядке
    /// подписки, без самого origin). Живость каждого получателя
    /// перепроверяется в `Fanout::next_recipient`.
    pub fn broadcast(&self, origin: Entity, position: Vec3) -> Fanout {
        let pending: VecDeque<Entity> = self
            .listeners
            .get(&origin)
            .map(|list| list.iter().copied().filter(|&l| l != origin).collect())
            .unwrap_or_default();

        Fanout {
            origin,
            position,
            pending,
        }
    }

    /// Подписать listener на source. false если уже подписан или не члены.
    fn subscribe(&mut self, listener: Entity, source: Entity) -> bool {
        if listener == source || !self.contains(listener) || !self.contains(source) {
            return false;
        }
        let list = self.listeners.entry(source).or_default();
        if list.contains(&listener) {
            return false;
        }
        list.push(listener);
        true
    }
}

/// Snapshot получателей одного broadcast
#[derive(Debug, Clone)]
pub struct Fanout {
    pub origin: Entity,
    pub position: Vec3,
    pending: VecDeque<Entity>,
}

impl Fanout {
    /// Следующий получатель, всё ещё подписанный на origin
    ///
    /// Агент, снятый с регистрации во время fanout, пропускается.
    pub fn next_recipient(&mut self, directory: &GossipDirectory) -> Option<Entity> {
        while let Some(candidate) = self.pending.pop_front() {
            if directory.is_subscribed(candidate, self.origin) {
                return Some(candidate);
            }
        }
        None
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}
