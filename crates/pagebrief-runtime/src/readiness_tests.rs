use super::*;

const TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test(start_paused = true)]
async fn test_ready_after_expect() {
    let registry = ReadinessRegistry::new();
    let wait = registry.claim(SurfaceId(1), Uuid::new_v4());
    assert!(registry.is_waiting(SurfaceId(1)));

    assert!(registry.mark_ready(SurfaceId(1)));
    assert_eq!(wait.wait(&registry, TIMEOUT).await, ReadyOutcome::Ready);
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ready_before_expect() {
    let registry = ReadinessRegistry::new();
    assert!(!registry.mark_ready(SurfaceId(1)));
    assert_eq!(registry.len(), 1);

    let wait = registry.claim(SurfaceId(1), Uuid::new_v4());
    assert!(matches!(wait, ReadyWait::AlreadyReady));
    assert_eq!(wait.wait(&registry, TIMEOUT).await, ReadyOutcome::Ready);
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timeout_evicts_claim() {
    let registry = ReadinessRegistry::new();
    let wait = registry.claim(SurfaceId(3), Uuid::new_v4());
    let start = tokio::time::Instant::now();

    assert_eq!(wait.wait(&registry, TIMEOUT).await, ReadyOutcome::TimedOut);
    assert_eq!(start.elapsed(), TIMEOUT);
    assert!(!registry.is_waiting(SurfaceId(3)));
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_newer_request_supersedes() {
    let registry = ReadinessRegistry::new();
    let first = registry.claim(SurfaceId(5), Uuid::new_v4());
    let second = registry.claim(SurfaceId(5), Uuid::new_v4());

    assert_eq!(first.wait(&registry, TIMEOUT).await, ReadyOutcome::Superseded);

    assert!(registry.mark_ready(SurfaceId(5)));
    assert_eq!(second.wait(&registry, TIMEOUT).await, ReadyOutcome::Ready);
}

#[tokio::test]
async fn test_forget_only_removes_own_claim() {
    let registry = ReadinessRegistry::new();
    let old = Uuid::new_v4();
    let new = Uuid::new_v4();
    let _first = registry.claim(SurfaceId(7), old);
    let _second = registry.claim(SurfaceId(7), new);

    registry.forget(SurfaceId(7), old);
    assert!(registry.is_waiting(SurfaceId(7)));

    registry.forget(SurfaceId(7), new);
    assert!(!registry.is_waiting(SurfaceId(7)));
}

#[tokio::test]
async fn test_surfaces_are_independent() {
    let registry = ReadinessRegistry::new();
    let a = registry.claim(SurfaceId(1), Uuid::new_v4());
    let _b = registry.claim(SurfaceId(2), Uuid::new_v4());

    registry.mark_ready(SurfaceId(1));
    assert_eq!(a.wait(&registry, TIMEOUT).await, ReadyOutcome::Ready);
    assert!(registry.is_waiting(SurfaceId(2)));
}

#[tokio::test]
async fn test_signal_after_waiter_dropped_is_kept() {
    let registry = ReadinessRegistry::new();
    let wait = registry.claim(SurfaceId(8), Uuid::new_v4());
    drop(wait);

    assert!(!registry.mark_ready(SurfaceId(8)));
    let again = registry.claim(SurfaceId(8), Uuid::new_v4());
    assert!(matches!(again, ReadyWait::AlreadyReady));
}

#[tokio::test(start_paused = true)]
async fn test_unclaimed_signal_expires() {
    let registry = ReadinessRegistry::with_ttl(TIMEOUT);
    registry.mark_ready(SurfaceId(10));
    tokio::time::sleep(TIMEOUT).await;

    registry.mark_ready(SurfaceId(11));
    assert_eq!(registry.len(), 1);
    let wait = registry.claim(SurfaceId(10), Uuid::new_v4());
    assert!(matches!(wait, ReadyWait::Pending { .. }));
}

#[test]
fn test_release_keeps_newer_claim() {
    let registry = ReadinessRegistry::new();
    let old = Uuid::new_v4();
    let _first = registry.claim(SurfaceId(12), old);
    let _second = registry.claim(SurfaceId(12), Uuid::new_v4());

    registry.release(SurfaceId(12), old);
    assert!(registry.is_waiting(SurfaceId(12)));
}

#[tokio::test]
async fn test_release_drops_leftover_signal() {
    let registry = ReadinessRegistry::new();
    let id = Uuid::new_v4();
    registry.mark_ready(SurfaceId(13));
    registry.release(SurfaceId(13), id);
    assert!(registry.is_empty());
}
