//! End-to-end delivery flows: background receipt, relay echo, foreground
//! merge, click routing, and teardown.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use brewpos_notify::prelude::*;
use brewpos_notify_testing::{
    ChannelTransport, FakeWindowManager, RecordingNotifier, UnsupportedTransport,
};

fn payload(id: &str, title: &str) -> PushPayload {
    PushPayload::from_json(&format!(
        r#"{{"notification":{{"title":"{title}"}},"messageId":"{id}"}}"#
    ))
    .unwrap()
}

fn receiver_over(
    relay: Relay,
    notifier: &Arc<RecordingNotifier>,
    windows: &Arc<FakeWindowManager>,
) -> PushReceiver {
    PushReceiver::new(NotifyConfig::new(), relay, notifier.clone(), windows.clone())
}

async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within timeout");
}

#[tokio::test]
async fn background_push_displays_and_echoes_on_relay() {
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create("test");
    let notifier = Arc::new(RecordingNotifier::new());
    let windows = Arc::new(FakeWindowManager::new());
    let receiver = receiver_over(relay.clone(), &notifier, &windows);

    let mut sub = relay.subscribe();
    let message = receiver
        .handle_push(&payload("m1", "Order #5"))
        .await
        .unwrap();
    assert_eq!(message.message_id, "m1");

    // Displayed note: server title, placeholder body, fallback icon
    let displayed = notifier.displayed();
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].title, "Order #5");
    assert_eq!(displayed[0].body, "You have a new message.");
    assert_eq!(displayed[0].icon, "/icons/notification.png");
    assert_eq!(displayed[0].message_id, "m1");

    // Relay echo carries the same normalized fields
    match sub.recv().await.unwrap().unwrap() {
        RelayEvent::NewNotification {
            message_id,
            title,
            body,
        } => {
            assert_eq!(message_id, "m1");
            assert_eq!(title, "Order #5");
            assert_eq!(body, "You have a new message.");
        }
    }
}

#[tokio::test]
async fn relay_echo_publishes_even_with_no_page_open() {
    let relay = RelayRegistry::new().get_or_create("test");
    let notifier = Arc::new(RecordingNotifier::new());
    let windows = Arc::new(FakeWindowManager::new());
    let receiver = receiver_over(relay, &notifier, &windows);

    // No subscribers anywhere; the push must still succeed
    let message = receiver
        .handle_push(&payload("m1", "Order #5"))
        .await
        .unwrap();
    assert_eq!(message.title, "Order #5");
}

#[tokio::test]
async fn display_failure_does_not_suppress_relay_echo() {
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create("test");
    let notifier = Arc::new(RecordingNotifier::new());
    notifier.fail_with("permission denied");
    let windows = Arc::new(FakeWindowManager::new());
    let receiver = receiver_over(relay.clone(), &notifier, &windows);

    let mut sub = relay.subscribe();
    let result = receiver.handle_push(&payload("m1", "Order #5")).await;
    assert!(matches!(result, Err(NotifyError::DisplayFailed(_))));

    // The echo went out regardless
    assert_eq!(sub.recv().await.unwrap().unwrap().message_id(), "m1");
}

#[tokio::test]
async fn foreground_merges_direct_and_relay_paths_without_duplicates() {
    let config = NotifyConfig::new();
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create(&config.channel_name);
    let transport = Arc::new(ChannelTransport::new());
    let sender = transport.sender();

    let store = NotificationStore::new();
    let handle = PushListener::spawn(store.clone(), relay.clone(), transport, config);

    // Direct delivery lands first
    sender.send(payload("m1", "Order #5")).await.unwrap();
    wait_until(|| store.len() == 1).await;

    // The relay echo of the same alert is dropped by dedup
    relay.publish(RelayEvent::NewNotification {
        message_id: "m1".to_string(),
        title: "Order #5".to_string(),
        body: "You have a new message.".to_string(),
    });
    // A second, distinct alert still gets through
    relay.publish(RelayEvent::NewNotification {
        message_id: "m2".to_string(),
        title: "Order #6".to_string(),
        body: "You have a new message.".to_string(),
    });
    wait_until(|| store.len() == 2).await;

    let ids: Vec<String> = store
        .notifications()
        .into_iter()
        .map(|m| m.message_id)
        .collect();
    assert_eq!(ids, vec!["m1", "m2"]);

    handle.join().await;
}

#[tokio::test]
async fn background_to_foreground_pipeline_delivers_once() {
    let config = NotifyConfig::new();
    let registry = RelayRegistry::new();

    // Foreground context mounts first so the relay subscription exists
    let store = NotificationStore::new();
    let handle = PushListener::spawn(
        store.clone(),
        registry.get_or_create(&config.channel_name),
        Arc::new(UnsupportedTransport),
        config.clone(),
    );
    wait_until({
        let relay = registry.get_or_create(&config.channel_name);
        move || relay.subscriber_count() == 1
    })
    .await;

    // Background context receives the push
    let notifier = Arc::new(RecordingNotifier::new());
    let windows = Arc::new(FakeWindowManager::new());
    let receiver = receiver_over(
        registry.get_or_create(&config.channel_name),
        &notifier,
        &windows,
    );
    receiver
        .handle_push(&payload("m1", "Order #5"))
        .await
        .unwrap();

    wait_until(|| store.len() == 1).await;
    let stored = &store.notifications()[0];
    assert_eq!(stored.message_id, "m1");
    assert_eq!(stored.title, "Order #5");

    handle.join().await;
}

#[tokio::test]
async fn redundant_listeners_on_one_store_do_not_duplicate() {
    // Hot reload can mount a second listener over the same session store
    let config = NotifyConfig::new();
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create(&config.channel_name);

    let store = NotificationStore::new();
    let first = PushListener::spawn(
        store.clone(),
        relay.clone(),
        Arc::new(UnsupportedTransport),
        config.clone(),
    );
    let second = PushListener::spawn(
        store.clone(),
        relay.clone(),
        Arc::new(UnsupportedTransport),
        config,
    );
    wait_until(|| relay.subscriber_count() == 2).await;

    relay.publish(RelayEvent::NewNotification {
        message_id: "m1".to_string(),
        title: "t".to_string(),
        body: "b".to_string(),
    });

    wait_until(|| store.len() == 1).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.len(), 1);

    first.join().await;
    second.join().await;
}

#[tokio::test]
async fn detach_stops_further_store_mutations() {
    let config = NotifyConfig::new();
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create(&config.channel_name);
    let transport = Arc::new(ChannelTransport::new());
    let sender = transport.sender();

    let store = NotificationStore::new();
    let mut handle = PushListener::spawn(store.clone(), relay.clone(), transport, config);

    sender.send(payload("m1", "before")).await.unwrap();
    wait_until(|| store.len() == 1).await;

    handle.detach();
    assert!(handle.is_detached());
    handle.detach(); // idempotent
    handle.join().await;

    let _ = sender.send(payload("m2", "after")).await;
    relay.publish(RelayEvent::NewNotification {
        message_id: "m3".to_string(),
        title: "after".to_string(),
        body: "b".to_string(),
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn detach_during_transport_init_never_touches_the_store() {
    struct GatedTransport {
        gate: Arc<Notify>,
        inner: ChannelTransport,
    }

    #[async_trait]
    impl PushTransport for GatedTransport {
        async fn subscribe(&self) -> Option<mpsc::Receiver<PushPayload>> {
            self.gate.notified().await;
            self.inner.subscribe().await
        }
    }

    let gate = Arc::new(Notify::new());
    let transport = Arc::new(GatedTransport {
        gate: gate.clone(),
        inner: ChannelTransport::new(),
    });

    let config = NotifyConfig::new();
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create(&config.channel_name);
    let store = NotificationStore::new();
    let mut handle = PushListener::spawn(store.clone(), relay.clone(), transport, config);

    // Tear down while subscribe() is still pending, then let it resolve
    handle.detach();
    gate.notify_one();
    handle.join().await;

    relay.publish(RelayEvent::NewNotification {
        message_id: "m1".to_string(),
        title: "t".to_string(),
        body: "b".to_string(),
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn unsupported_transport_still_receives_relay_events() {
    let config = NotifyConfig::new();
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create(&config.channel_name);

    let store = NotificationStore::new();
    let handle = PushListener::spawn(
        store.clone(),
        relay.clone(),
        Arc::new(UnsupportedTransport),
        config,
    );
    wait_until(|| relay.subscriber_count() == 1).await;

    relay.publish(RelayEvent::NewNotification {
        message_id: "m1".to_string(),
        title: "t".to_string(),
        body: "b".to_string(),
    });
    wait_until(|| store.len() == 1).await;

    handle.join().await;
}

#[tokio::test]
async fn click_with_no_window_opens_one_at_the_url() {
    let registry = RelayRegistry::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let windows = Arc::new(FakeWindowManager::new());
    let receiver = receiver_over(registry.get_or_create("test"), &notifier, &windows);

    let outcome = receiver
        .handle_click(&NotificationClick {
            message_id: "m1".to_string(),
            url: Some("/orders/5".to_string()),
        })
        .await
        .unwrap();

    assert!(matches!(outcome, ClickOutcome::OpenedNew(_)));
    assert_eq!(windows.opened_urls(), vec!["/orders/5"]);
    assert!(windows.focused().is_empty());
}

#[tokio::test]
async fn click_with_open_window_focuses_and_posts() {
    let registry = RelayRegistry::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let windows = Arc::new(FakeWindowManager::new());
    let existing = windows.open_existing();
    let receiver = receiver_over(registry.get_or_create("test"), &notifier, &windows);

    let outcome = receiver
        .handle_click(&NotificationClick {
            message_id: "m1".to_string(),
            url: Some("/orders/5".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(outcome, ClickOutcome::FocusedExisting(existing));
    assert_eq!(windows.focused(), vec![existing]);
    assert!(windows.opened_urls().is_empty());

    let posted = windows.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].0, existing);
    assert_eq!(
        posted[0].1,
        WindowMessage::NotificationClicked {
            message_id: "m1".to_string(),
            url: "/orders/5".to_string(),
        }
    );
}

#[tokio::test]
async fn click_without_url_falls_back_to_app_root() {
    let registry = RelayRegistry::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let windows = Arc::new(FakeWindowManager::new());
    let receiver = receiver_over(registry.get_or_create("test"), &notifier, &windows);

    receiver
        .handle_click(&NotificationClick {
            message_id: "m1".to_string(),
            url: None,
        })
        .await
        .unwrap();

    assert_eq!(windows.opened_urls(), vec!["/"]);
}

#[tokio::test]
async fn center_mounts_reads_and_unmounts() {
    let config = NotifyConfig::new();
    let registry = RelayRegistry::new();
    let relay = registry.get_or_create(&config.channel_name);

    let mut center = NotificationCenter::mount(config, &registry, Arc::new(UnsupportedTransport));
    wait_until(|| relay.subscriber_count() == 1).await;

    relay.publish(RelayEvent::NewNotification {
        message_id: "m1".to_string(),
        title: "Order #5".to_string(),
        body: "b".to_string(),
    });
    let store = center.store();
    wait_until(|| store.len() == 1).await;

    assert_eq!(center.unread_count(), 1);
    assert!(center.mark_read("m1"));
    assert_eq!(center.unread_count(), 0);

    // Manual adds go through the same dedup
    assert!(!center.add_notification(NotificationMessage::new("m1", "dup", "dup")));
    assert!(center.add_notification(NotificationMessage::new("m2", "t", "b")));
    center.mark_all_read();
    assert_eq!(center.unread_count(), 0);

    center.unmount();
    relay.publish(RelayEvent::NewNotification {
        message_id: "m3".to_string(),
        title: "t".to_string(),
        body: "b".to_string(),
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(center.notifications().len(), 2);
}

#[tokio::test]
async fn disabled_relay_degrades_both_contexts_silently() {
    let config = NotifyConfig::new();
    let registry = RelayRegistry::disabled();
    let notifier = Arc::new(RecordingNotifier::new());
    let windows = Arc::new(FakeWindowManager::new());
    let receiver = receiver_over(
        registry.get_or_create(&config.channel_name),
        &notifier,
        &windows,
    );

    // Background: push still displays, echo is silently dropped
    receiver
        .handle_push(&payload("m1", "Order #5"))
        .await
        .unwrap();
    assert_eq!(notifier.displayed().len(), 1);

    // Foreground: direct delivery still works without a relay
    let transport = Arc::new(ChannelTransport::new());
    let sender = transport.sender();
    let store = NotificationStore::new();
    let handle = PushListener::spawn(
        store.clone(),
        registry.get_or_create(&config.channel_name),
        transport,
        config,
    );

    sender.send(payload("m2", "Order #6")).await.unwrap();
    wait_until(|| store.len() == 1).await;
    assert_eq!(store.notifications()[0].message_id, "m2");

    handle.join().await;
}
