//! Tests for gossip directory.

#[cfg(test)]
mod tests {
    use super::super::directory::GossipDirectory;
    use bevy::prelude::*;

    fn agents(count: u32) -> Vec<Entity> {
        (1..=count).map(Entity::from_raw).collect()
    }

    fn drain(directory: &GossipDirectory, origin: Entity) -> Vec<Entity> {
        let mut fanout = directory.broadcast(origin, Vec3::ZERO);
        let mut delivered = Vec::new();
        while let Some(recipient) = fanout.next_recipient(directory) {
            delivered.push(recipient);
        }
        delivered
    }

    #[test]
    fn test_register_links_bidirectionally() {
        let mut directory = GossipDirectory::default();
        let a = agents(3);
        for &agent in &a {
            directory.register(agent);
        }

        for &listener in &a {
            for &source in &a {
                if listener != source {
                    assert!(directory.is_subscribed(listener, source));
                }
            }
        }
        assert!(directory.is_converged());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut directory = GossipDirectory::default();
        let a = agents(2);
        assert!(directory.register(a[0]));
        assert!(directory.register(a[1]));
        assert!(!directory.register(a[1]));
        assert!(!directory.register(a[0]));

        assert_eq!(directory.len(), 2);
        // Одна доставка, не две
        assert_eq!(drain(&directory, a[0]), vec![a[1]]);
    }

    #[test]
    fn test_broadcast_excludes_origin_in_registration_order() {
        let mut directory = GossipDirectory::default();
        let a = agents(4);
        for &agent in &a {
            directory.register(agent);
        }

        assert_eq!(drain(&directory, a[2]), vec![a[0], a[1], a[3]]);
    }

    #[test]
    fn test_unregister_removes_all_subscriptions() {
        let mut directory = GossipDirectory::default();
        let a = agents(3);
        for &agent in &a {
            directory.register(agent);
        }

        assert!(directory.unregister(a[1]));
        assert!(!directory.unregister(a[1]));
        assert!(!directory.is_subscribed(a[1], a[0]));
        assert!(!directory.is_subscribed(a[0], a[1]));
        assert_eq!(drain(&directory, a[0]), vec![a[2]]);
        assert!(drain(&directory, a[1]).is_empty());
    }

    #[test]
    fn test_unregister_mid_fanout_skips_recipient() {
        let mut directory = GossipDirectory::default();
        let a = agents(3);
        for &agent in &a {
            directory.register(agent);
        }

        let mut fanout = directory.broadcast(a[0], Vec3::ONE);
        assert_eq!(fanout.remaining(), 2);

        // a[2] умирает пока fanout ещё не дошёл до него
        directory.unregister(a[2]);

        assert_eq!(fanout.next_recipient(&directory), Some(a[1]));
        assert_eq!(fanout.next_recipient(&directory), None);
    }

    #[test]
    fn test_reconcile_prunes_dead_members() {
        let mut directory = GossipDirectory::default();
        let a = agents(3);
        for &agent in &a {
            directory.register(agent);
        }

        let dead = a[0];
        let report = directory.reconcile(|agent| agent != dead);
        assert_eq!(report.pruned, vec![dead]);
        assert_eq!(report.linked, 0);
        assert!(!directory.contains(dead));
        assert!(directory.is_converged());
    }

    #[test]
    fn test_unknown_origin_broadcast_is_empty() {
        let directory = GossipDirectory::default();
        assert!(drain(&directory, Entity::from_raw(99)).is_empty());
    }
}
