use kitchen_shelves::dispatch::{CourierTally, Dispatcher, FixedDelay};
use kitchen_shelves::kitchen_actor::mock::{create_mock_client, expect_pickup, MockKitchen};
use kitchen_shelves::kitchen_actor::KitchenError;
use kitchen_shelves::model::OrderId;
use std::time::Duration;
use tokio::time::Instant;

/// Real dispatcher against a scripted kitchen.
/// Each courier asks exactly once and reports what it found.
#[tokio::test(start_paused = true)]
async fn test_couriers_report_pickup_outcomes() {
    let mut mock = MockKitchen::new();
    mock.expect_pickup(OrderId(1)).return_ok(true);
    mock.expect_pickup(OrderId(2)).return_ok(false);
    mock.expect_pickup(OrderId(3))
        .return_err(KitchenError::ActorClosed);

    // Staggered arrivals keep the pickup order deterministic.
    let mut next = 0;
    let delays = move || {
        next += 1;
        Duration::from_secs(next)
    };
    let mut dispatcher = Dispatcher::new(mock.client(), delays);

    assert_eq!(dispatcher.schedule(OrderId(1)), Duration::from_secs(1));
    assert_eq!(dispatcher.schedule(OrderId(2)), Duration::from_secs(2));
    assert_eq!(dispatcher.schedule(OrderId(3)), Duration::from_secs(3));
    assert_eq!(dispatcher.pending(), 3);

    let mut reports = dispatcher.drain().await;
    reports.sort_by_key(|r| r.order_id);
    let outcomes: Vec<bool> = reports.iter().map(|r| r.picked_up).collect();
    assert_eq!(outcomes, vec![true, false, false]);
    assert_eq!(dispatcher.pending(), 0);
    assert_eq!(
        dispatcher.tally(),
        CourierTally {
            dispatched: 3,
            picked_up: 1,
            missed: 2,
            recalled: 0,
        }
    );

    mock.verify().await;
}

/// Returned couriers are folded into the tally as new ones go out.
#[tokio::test(start_paused = true)]
async fn test_schedule_reaps_returned_couriers() {
    let mut mock = MockKitchen::new();
    for id in 1..=3 {
        mock.expect_pickup(OrderId(id)).return_ok(true);
    }
    let mut dispatcher = Dispatcher::new(mock.client(), FixedDelay(Duration::from_millis(1)));

    for id in 1..=3 {
        dispatcher.schedule(OrderId(id));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(dispatcher.pending() <= 1);
    }

    assert!(dispatcher.drain().await.is_empty());
    assert_eq!(dispatcher.tally().dispatched, 3);
    assert_eq!(dispatcher.tally().picked_up, 3);

    mock.verify().await;
}

/// Couriers stay away for their full delay before asking for the order.
#[tokio::test(start_paused = true)]
async fn test_courier_waits_for_its_delay() {
    let (client, mut receiver) = create_mock_client(10);
    let mut dispatcher = Dispatcher::new(client, FixedDelay(Duration::from_secs(4)));

    let start = Instant::now();
    dispatcher.schedule(OrderId(7));

    let (id, responder) = expect_pickup(&mut receiver)
        .await
        .expect("Expected Pickup request");
    assert_eq!(id, OrderId(7));
    assert!(start.elapsed() >= Duration::from_secs(4));
    responder.send(Ok(true)).unwrap();

    let reports = dispatcher.drain().await;
    assert_eq!(reports.len(), 1);
    assert!(reports[0].picked_up);
    assert_eq!(reports[0].delay, Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_recall_cancels_pending_couriers() {
    let (client, mut receiver) = create_mock_client(10);
    let mut dispatcher = Dispatcher::new(client, FixedDelay(Duration::from_secs(60)));
    dispatcher.schedule(OrderId(1));
    dispatcher.schedule(OrderId(2));

    assert_eq!(dispatcher.recall().await, 2);
    assert_eq!(dispatcher.pending(), 0);
    assert_eq!(dispatcher.tally().recalled, 2);

    // The dispatcher holds the last sender; once it is gone nothing was ever sent.
    drop(dispatcher);
    assert!(receiver.recv().await.is_none());
}
