//! Scheduled resumptions: отложенные продолжения FSM
//!
//! Вместо suspended корутин: запись {agent, kind, due_tick} в очереди.
//! MonsterTick забирает созревшие записи и заново входит в FSM.
//! По умолчанию таймеры fire-and-forget: запущенный scream / attack wind-up
//! всегда доходит до конца. `cancel`: opt-in расширение (тесты, tooling).

use bevy::prelude::*;

/// Что делать при срабатывании
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ResumptionKind {
    /// Screaming → Running
    ScreamElapsed,
    /// Attack wind-up закончился → capture или fall-through в Wandering
    ResolveCapture,
}

/// Handle для opt-in отмены. Монотонный, задаёт порядок при равном due_tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResumptionHandle(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledResumption {
    pub handle: ResumptionHandle,
    pub due_tick: u64,
    pub agent: Entity,
    pub kind: ResumptionKind,
}

/// Resource: очередь отложенных продолжений
#[derive(Resource, Debug, Default)]
pub struct ResumptionQueue {
    next_handle: u64,
    pending: Vec<ScheduledResumption>,
}

impl ResumptionQueue {
    /// Запланировать через `delay_ticks` тиков от `now`
    ///
    /// Минимальная задержка: 1 тик: запись, сделанная в тике N, не может
    /// сработать в том же тике (resumptions этого тика уже обработаны).
    pub fn schedule(
        &mut self,
        now: u64,
        delay_ticks: u64,
        agent: Entity,
        kind: ResumptionKind,
    ) -> ResumptionHandle {
        let handle = ResumptionHandle(self.next_handle);
        self.next_handle += 1;

        self.pending.push(ScheduledResumption {
            handle,
            due_tick: now.saturating_add(delay_ticks.max(1)),
            agent,
            kind,
        });
        handle
    }

    /// Opt-in отмена. Возвращает true если запись ещё ждала.
    pub fn cancel(&mut self, handle: ResumptionHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|r| r.handle != handle);
        self.pending.len() != before
    }

    /// Забрать все записи с due_tick <= now, в порядке (due_tick, handle)
    pub fn drain_due(&mut self, now: u64) -> Vec<ScheduledResumption> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|r| r.due_tick <= now);
        self.pending = waiting;
        due.sort_by_key(|r| (r.due_tick, r.handle));
        due
    }

    pub fn pending_for(&self, agent: Entity) -> impl Iterator<Item = &ScheduledResumption> {
        self.pending.iter().filter(move |r| r.agent == agent)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn test_drain_due_orders_by_tick_then_handle() {
        let mut queue = ResumptionQueue::default();
        let late = queue.schedule(0, 5, agent(1), ResumptionKind::ScreamElapsed);
        let first = queue.schedule(0, 3, agent(2), ResumptionKind::ResolveCapture);
        let second = queue.schedule(0, 3, agent(3), ResumptionKind::ScreamElapsed);

        assert!(queue.drain_due(2).is_empty());

        let due = queue.drain_due(3);
        let handles: Vec<_> = due.iter().map(|r| r.handle).collect();
        assert_eq!(handles, vec![first, second]);
        assert_eq!(queue.len(), 1);

        let due = queue.drain_due(10);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].handle, late);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_delay_waits_one_tick() {
        let mut queue = ResumptionQueue::default();
        queue.schedule(7, 0, agent(1), ResumptionKind::ResolveCapture);
        assert!(queue.drain_due(7).is_empty());
        assert_eq!(queue.drain_due(8).len(), 1);
    }

    #[test]
    fn test_cancel_is_opt_in() {
        let mut queue = ResumptionQueue::default();
        let handle = queue.schedule(0, 2, agent(1), ResumptionKind::ScreamElapsed);
        assert_eq!(queue.pending_for(agent(1)).count(), 1);

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(queue.drain_due(100).is_empty());
    }
}
