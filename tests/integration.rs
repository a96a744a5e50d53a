//! Integration tests for the mediator.
//!
//! These tests drive `send` and `publish` end to end through the bundled
//! registry and through closure-based resolvers.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::Poll;

use mediator::binding::{NotificationKey, RequestKey};
use mediator::handler::{
    DynNotificationHandler, DynRequestHandler, HandlerResult, NotificationAdapter,
    NotificationHandler, RequestAdapter, RequestHandler,
};
use mediator::{Mediator, MediatorError, Notification, PublishPolicy, Request};

struct TasksList {
    tasks: Vec<String>,
}

impl TasksList {
    fn new(tasks: &[&str]) -> Self {
        Self {
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        }
    }
}

struct GetTaskNamesQuery {
    filter: String,
}

impl GetTaskNamesQuery {
    fn new(filter: &str) -> Self {
        Self {
            filter: filter.to_string(),
        }
    }
}

impl Request for GetTaskNamesQuery {
    type Response = Vec<String>;
}

/// Case-insensitive filter over the backing task list; counts invocations.
struct GetTaskNamesQueryHandler {
    task_list: TasksList,
    calls: AtomicUsize,
}

impl GetTaskNamesQueryHandler {
    fn new(task_list: TasksList) -> Self {
        Self {
            task_list,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RequestHandler<GetTaskNamesQuery> for GetTaskNamesQueryHandler {
    fn handle(&self, query: &GetTaskNamesQuery) -> HandlerResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let filter = query.filter.to_lowercase();
        Ok(self
            .task_list
            .tasks
            .iter()
            .filter(|name| name.to_lowercase().contains(&filter))
            .cloned()
            .collect())
    }
}

/// Shares the backing response type with `GetTaskNamesQuery`.
struct GetAllTaskNamesQuery;

impl Request for GetAllTaskNamesQuery {
    type Response = Vec<String>;
}

struct TaskCreated {
    name: String,
}

impl Notification for TaskCreated {}

struct TasksArchived;

impl Notification for TasksArchived {}

/// Records `label:task` for each notification it sees.
struct Listener {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl NotificationHandler<TaskCreated> for Listener {
    fn handle(&self, notification: &TaskCreated) -> HandlerResult<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.label, notification.name));
        Ok(())
    }
}

fn sample_tasks() -> TasksList {
    TasksList::new(&["Cleaning the house", "Cooking", "Spring cleaning", "Shopping"])
}

/// Scenario: one handler bound to the query; `send` returns exactly what the
/// handler computes.
#[tokio::test]
async fn test_send_query_to_registered_handler() {
    let handler = Arc::new(GetTaskNamesQueryHandler::new(sample_tasks()));
    let mediator = Mediator::builder()
        .request_handler::<GetTaskNamesQuery, _>(handler.clone())
        .build();

    let result = mediator
        .send(GetTaskNamesQuery::new("cleaning"))
        .await
        .unwrap();

    let direct = RequestHandler::<GetTaskNamesQuery>::handle(
        handler.as_ref(),
        &GetTaskNamesQuery::new("cleaning"),
    )
    .unwrap();
    assert_eq!(result, direct);
    assert_eq!(
        result,
        vec!["Cleaning the house".to_string(), "Spring cleaning".to_string()]
    );
    // One call through the mediator, one direct.
    assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
}

/// Scenario: no handler bound; `send` fails and nothing runs.
#[tokio::test]
async fn test_send_unregistered_query_fails_without_side_effects() {
    let unrelated = Arc::new(GetTaskNamesQueryHandler::new(sample_tasks()));
    let mediator = Mediator::builder()
        .request_handler::<GetTaskNamesQuery, _>(unrelated.clone())
        .build();

    let err = mediator.send(GetAllTaskNamesQuery).await.unwrap_err();

    assert!(err.is_handler_not_found());
    assert!(err.to_string().contains("GetAllTaskNamesQuery"));
    assert_eq!(unrelated.calls.load(Ordering::SeqCst), 0);
}

/// Requests sharing a response type resolve to their own handlers.
#[tokio::test]
async fn test_shared_response_type_resolves_by_request() {
    let mediator = Mediator::builder()
        .request_handler::<GetTaskNamesQuery, _>(GetTaskNamesQueryHandler::new(sample_tasks()))
        .request_fn::<GetAllTaskNamesQuery, _>(|_| Ok(vec!["everything".to_string()]))
        .build();

    let filtered = mediator.send(GetTaskNamesQuery::new("shop")).await.unwrap();
    let all = mediator.send(GetAllTaskNamesQuery).await.unwrap();

    assert_eq!(filtered, vec!["Shopping".to_string()]);
    assert_eq!(all, vec!["everything".to_string()]);
}

/// Service locator keyed by resolution key, the way a container would be
/// wired in through a pair of lookup closures.
#[derive(Default)]
struct ServiceLocator {
    requests: HashMap<RequestKey, Vec<Arc<dyn DynRequestHandler>>>,
    notifications: HashMap<NotificationKey, Vec<Arc<dyn DynNotificationHandler>>>,
}

impl ServiceLocator {
    fn register_request(&mut self, bindings: Vec<Arc<dyn DynRequestHandler>>) {
        for binding in bindings {
            self.requests.entry(binding.key()).or_default().push(binding);
        }
    }

    fn register_notifications(&mut self, bindings: Vec<Arc<dyn DynNotificationHandler>>) {
        for binding in bindings {
            self.notifications
                .entry(binding.key())
                .or_default()
                .push(binding);
        }
    }
}

fn mediator_over(locator: ServiceLocator) -> Mediator {
    let locator = Arc::new(locator);
    let for_requests = locator.clone();
    Mediator::from_fns(
        move |key| Ok(for_requests.requests.get(key).and_then(|v| v.first().cloned())),
        move |key| Ok(locator.notifications.get(key).cloned().unwrap_or_default()),
    )
}

#[tokio::test]
async fn test_service_locator_without_registration() {
    let mediator = mediator_over(ServiceLocator::default());

    let err = mediator
        .send(GetTaskNamesQuery::new("cleaning"))
        .await
        .unwrap_err();
    assert!(err.is_handler_not_found());
}

#[tokio::test]
async fn test_service_locator_with_registration() {
    let mut locator = ServiceLocator::default();
    locator.register_request(vec![RequestAdapter::<GetTaskNamesQuery, _>::shared(
        GetTaskNamesQueryHandler::new(sample_tasks()),
    )]);
    let mediator = mediator_over(locator);

    let result = mediator.send(GetTaskNamesQuery::new("COOK")).await.unwrap();
    assert_eq!(result, vec!["Cooking".to_string()]);
}

/// A locator that fails on unknown keys; its error reaches the caller as-is.
#[tokio::test]
async fn test_strict_locator_error_propagates() {
    #[derive(Debug, thiserror::Error)]
    #[error("no service registered for {0}")]
    struct MissingService(String);

    let mediator = Mediator::from_fns(
        |key: &RequestKey| Err(MissingService(key.to_string()).into()),
        |_: &NotificationKey| Ok(Vec::new()),
    );

    let err = mediator
        .send(GetTaskNamesQuery::new("cleaning"))
        .await
        .unwrap_err();

    match err {
        MediatorError::Resolver(source) => {
            assert!(source.downcast_ref::<MissingService>().is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Scenario: two listeners, invoked once each, in registration order.
#[tokio::test]
async fn test_publish_fans_out_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mediator = Mediator::builder()
        .notification_handler::<TaskCreated, _>(Listener {
            label: "A",
            log: log.clone(),
        })
        .notification_handler::<TaskCreated, _>(Listener {
            label: "B",
            log: log.clone(),
        })
        .build();

    mediator
        .publish(TaskCreated {
            name: "laundry".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["A:laundry".to_string(), "B:laundry".to_string()]
    );
}

/// Scenario: nobody listens; success with no invocations.
#[tokio::test]
async fn test_publish_without_listeners() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mediator = Mediator::builder()
        .notification_handler::<TaskCreated, _>(Listener {
            label: "A",
            log: log.clone(),
        })
        .build();

    mediator.publish(TasksArchived).await.unwrap();

    assert!(log.lock().unwrap().is_empty());
}

/// The resolver's order is the invocation order, whatever it is.
#[tokio::test]
async fn test_publish_follows_resolver_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut locator = ServiceLocator::default();
    locator.register_notifications(
        ["third", "first", "second"]
            .into_iter()
            .map(|label| {
                NotificationAdapter::<TaskCreated, _>::shared(Listener {
                    label,
                    log: log.clone(),
                })
            })
            .collect(),
    );
    let mediator = mediator_over(locator);

    mediator
        .publish(TaskCreated {
            name: "x".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "third:x".to_string(),
            "first:x".to_string(),
            "second:x".to_string()
        ]
    );
}

/// Dropping `publish` after the first handler ran stops the rest.
#[tokio::test]
async fn test_dropped_publish_skips_remaining_handlers() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let (a, b) = (first.clone(), second.clone());

    let mediator = Mediator::builder()
        .notification_fn::<TasksArchived, _>(move |_| {
            a.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .notification_fn::<TasksArchived, _>(move |_| {
            b.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build();

    {
        let publish = mediator.publish(TasksArchived);
        tokio::pin!(publish);

        let first_poll = std::future::poll_fn(|cx| Poll::Ready(publish.as_mut().poll(cx))).await;
        assert!(first_poll.is_pending());
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    tokio::task::yield_now().await;
    assert_eq!(second.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_publish_policy_continue_runs_every_listener() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (a, b) = (calls.clone(), calls.clone());

    let mediator = Mediator::builder()
        .notification_fn::<TasksArchived, _>(move |_| {
            a.fetch_add(1, Ordering::SeqCst);
            Err("index unavailable".into())
        })
        .notification_fn::<TasksArchived, _>(move |_| {
            b.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .publish_policy(PublishPolicy::Continue)
        .build();

    let err = mediator.publish(TasksArchived).await.unwrap_err();

    assert_eq!(err.to_string(), "index unavailable");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends() {
    let handler = Arc::new(GetTaskNamesQueryHandler::new(sample_tasks()));
    let mediator = Mediator::builder()
        .request_handler::<GetTaskNamesQuery, _>(handler.clone())
        .build();

    let mut tasks = Vec::new();
    for i in 0..64 {
        let mediator = mediator.clone();
        tasks.push(tokio::spawn(async move {
            let filter = if i % 2 == 0 { "clean" } else { "shop" };
            mediator.send(GetTaskNamesQuery::new(filter)).await
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let names = task.await.unwrap().unwrap();
        let expected = if i % 2 == 0 { 2 } else { 1 };
        assert_eq!(names.len(), expected);
    }

    assert_eq!(handler.calls.load(Ordering::SeqCst), 64);
}
