use actor_framework::mock::create_mock_client;
use actor_framework::{
    ActorEntity, Filter, FrameworkError, ResourceActor, ResourceClient, ResourceRequest,
    Transaction,
};
use async_trait::async_trait;
use std::time::Duration;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Batch {
    id: u32,
    bakery: String,
    loaves: u32,
}

#[derive(Debug)]
struct BatchCreate {
    bakery: String,
    loaves: u32,
}

#[derive(Debug)]
struct BatchUpdate {
    loaves: Option<u32>,
}

#[derive(Debug)]
enum BatchAction {
    Sell(u32),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum BatchError {
    #[error("Only {available} loaves left")]
    SoldOut { available: u32 },
}

#[async_trait]
impl ActorEntity for Batch {
    type Id = u32;
    type Create = BatchCreate;
    type Update = BatchUpdate;
    type Action = BatchAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BatchError;

    fn from_create_params(id: u32, params: BatchCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            bakery: params.bakery,
            loaves: params.loaves,
        })
    }

    async fn on_update(
        &mut self,
        update: BatchUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(loaves) = update.loaves {
            self.loaves = loaves;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BatchAction,
        _ctx: &Self::Context,
    ) -> Result<u32, Self::Error> {
        match action {
            BatchAction::Sell(count) => {
                if count > self.loaves {
                    return Err(BatchError::SoldOut {
                        available: self.loaves,
                    });
                }
                self.loaves -= count;
                Ok(self.loaves)
            }
        }
    }
}

fn spawn_batches() -> ResourceClient<Batch> {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));
    client
}

async fn seed(client: &ResourceClient<Batch>, bakery: &str, loaves: u32) -> u32 {
    client
        .create(BatchCreate {
            bakery: bakery.to_string(),
            loaves,
        })
        .await
        .unwrap()
}

fn bakery(name: &'static str) -> Filter<Batch> {
    Filter::new("bakery", move |b: &Batch| b.bakery == name)
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = spawn_batches();

    let id = seed(&client, "Crumb & Co", 12).await;
    assert_eq!(id, 1);

    let left = client.perform_action(id, BatchAction::Sell(5)).await.unwrap();
    assert_eq!(left, 7);

    let err = client
        .perform_action(id, BatchAction::Sell(50))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<BatchError>().unwrap(),
        BatchError::SoldOut { available: 7 }
    );

    let updated = client
        .update(id, BatchUpdate { loaves: Some(20) })
        .await
        .unwrap();
    assert_eq!(updated.loaves, 20);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_query_filters_inside_actor() {
    let client = spawn_batches();
    seed(&client, "north", 1).await;
    seed(&client, "north", 2).await;
    seed(&client, "south", 3).await;

    let north = client.query(bakery("north")).await.unwrap();
    assert_eq!(north.len(), 2);
    assert!(north.iter().all(|b| b.bakery == "north"));
    assert_eq!(client.query(Filter::all()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_transaction_commit_removes_staged_items() {
    let client = spawn_batches();
    seed(&client, "north", 1).await;
    seed(&client, "north", 2).await;
    let south = seed(&client, "south", 3).await;

    let mut tx = Transaction::begin();
    let staged = tx.prepare_delete(&client, bakery("north")).await.unwrap();
    assert_eq!(staged.len(), 2);

    // Staged items are still visible until the commit.
    assert_eq!(client.query(Filter::all()).await.unwrap().len(), 3);

    assert_eq!(tx.commit().await.unwrap(), 2);
    let remaining = client.query(Filter::all()).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, south);
}

#[tokio::test]
async fn test_locked_items_reject_mutations_until_abort() {
    let client = spawn_batches();
    let id = seed(&client, "north", 4).await;

    let mut tx = Transaction::begin();
    tx.prepare_delete(&client, bakery("north")).await.unwrap();

    assert!(matches!(
        client.perform_action(id, BatchAction::Sell(1)).await,
        Err(FrameworkError::Locked(_))
    ));
    assert!(matches!(
        client.update(id, BatchUpdate { loaves: Some(9) }).await,
        Err(FrameworkError::Locked(_))
    ));
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::Locked(_))
    ));

    tx.abort().await;

    let batch = client.get(id).await.unwrap().unwrap();
    assert_eq!(batch.loaves, 4);
    assert_eq!(client.perform_action(id, BatchAction::Sell(1)).await.unwrap(), 3);
}

#[tokio::test]
async fn test_overlapping_prepare_in_same_transaction_is_idempotent() {
    let client = spawn_batches();
    seed(&client, "north", 1).await;
    seed(&client, "south", 2).await;

    let mut tx = Transaction::begin();
    let first = tx.prepare_delete(&client, bakery("north")).await.unwrap();
    let second = tx.prepare_delete(&client, Filter::all()).await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1, "already staged items are not returned twice");

    assert_eq!(tx.commit().await.unwrap(), 2);
    assert!(client.query(Filter::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_conflicting_transactions_do_not_overlap() {
    let client = spawn_batches();
    seed(&client, "north", 1).await;
    seed(&client, "south", 2).await;

    let mut first = Transaction::begin();
    first.prepare_delete(&client, bakery("north")).await.unwrap();

    let mut second = Transaction::begin();
    let conflict = second.prepare_delete(&client, Filter::all()).await;
    assert!(matches!(conflict, Err(FrameworkError::Locked(_))));
    second.abort().await;

    // The failed prepare locked nothing, so the south batch is still free.
    let south = client.query(bakery("south")).await.unwrap();
    assert!(client
        .perform_action(south[0].id, BatchAction::Sell(1))
        .await
        .is_ok());

    assert_eq!(first.commit().await.unwrap(), 1);
}

#[tokio::test]
async fn test_dropped_transaction_releases_locks() {
    let client = spawn_batches();
    let id = seed(&client, "north", 2).await;

    {
        let mut tx = Transaction::begin();
        tx.prepare_delete(&client, bakery("north")).await.unwrap();
    }

    // The abort is spawned from Drop; poll until it lands.
    let mut released = false;
    for _ in 0..50 {
        if client.perform_action(id, BatchAction::Sell(1)).await.is_ok() {
            released = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(released, "locks should be released after the transaction is dropped");
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_abandoned_commit_still_reaches_every_participant() {
    let first = spawn_batches();
    let last = spawn_batches();
    seed(&first, "north", 1).await;
    let held = seed(&last, "north", 2).await;

    // A participant that takes its time to commit.
    let (slow, mut requests) = create_mock_client::<Batch>(8);
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            match request {
                ResourceRequest::Prepare { respond_to, .. } => {
                    let _ = respond_to.send(Ok(Vec::new()));
                }
                ResourceRequest::Commit { respond_to, .. } => {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    let _ = respond_to.send(Ok(0));
                }
                ResourceRequest::Abort { respond_to, .. } => {
                    let _ = respond_to.send(Ok(()));
                }
                _ => {}
            }
        }
    });

    let mut tx = Transaction::begin();
    tx.prepare_delete(&first, Filter::all()).await.unwrap();
    tx.prepare_delete(&slow, Filter::all()).await.unwrap();
    tx.prepare_delete(&last, Filter::all()).await.unwrap();

    // The caller gives up while the slow participant is still committing.
    let outcome = tokio::time::timeout(Duration::from_millis(50), tx.commit()).await;
    assert!(outcome.is_err());
    assert!(first.query(Filter::all()).await.unwrap().is_empty());

    let mut committed = false;
    for _ in 0..50 {
        if last.query(Filter::all()).await.unwrap().is_empty() {
            committed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(committed, "the participant after the slow one should still commit");
    assert!(matches!(
        last.update(held, BatchUpdate { loaves: Some(1) }).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_commit_releases_later_participants() {
    let last = spawn_batches();
    let id = seed(&last, "north", 3).await;

    // A participant that goes away mid-commit.
    let (broken, mut requests) = create_mock_client::<Batch>(8);
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            match request {
                ResourceRequest::Prepare { respond_to, .. } => {
                    let _ = respond_to.send(Ok(Vec::new()));
                }
                ResourceRequest::Commit { respond_to, .. } => drop(respond_to),
                _ => {}
            }
        }
    });

    let mut tx = Transaction::begin();
    tx.prepare_delete(&broken, Filter::all()).await.unwrap();
    tx.prepare_delete(&last, Filter::all()).await.unwrap();

    assert!(matches!(
        tx.commit().await,
        Err(FrameworkError::ActorDropped)
    ));

    // The participant after the failure was aborted, not committed.
    assert!(last.get(id).await.unwrap().is_some());
    assert_eq!(last.perform_action(id, BatchAction::Sell(1)).await.unwrap(), 2);
}
