use log::{info, warn};

use crate::application::cart_store::CartStore;
use crate::domain::cart::ProductId;
use crate::domain::errors::CartError;
use crate::domain::ports::{PersistenceStore, StockService};
use crate::errors::{Notice, Notifier, Operation};

// ── Operation boundary ───────────────────────────────────────────────────────
//
// Each handler runs one cart operation. A failure is logged, turned into a
// `Notice`, handed to the notifier and returned, so it never escapes as a fault.

pub async fn add_product<S, P, N>(
    store: &mut CartStore<S, P>,
    notifier: &N,
    product_id: ProductId,
) -> Result<(), Notice>
where
    S: StockService,
    P: PersistenceStore,
    N: Notifier,
{
    let result = store.add_product(product_id).await;
    report(Operation::Add, result, notifier)
}

pub fn remove_product<S, P, N>(
    store: &mut CartStore<S, P>,
    notifier: &N,
    product_id: ProductId,
) -> Result<(), Notice>
where
    S: StockService,
    P: PersistenceStore,
    N: Notifier,
{
    let result = store.remove_product(product_id);
    report(Operation::Remove, result, notifier)
}

pub async fn update_product_amount<S, P, N>(
    store: &mut CartStore<S, P>,
    notifier: &N,
    product_id: ProductId,
    amount: i64,
) -> Result<(), Notice>
where
    S: StockService,
    P: PersistenceStore,
    N: Notifier,
{
    let result = store.update_product_amount(product_id, amount).await;
    report(Operation::Update, result, notifier)
}

fn report<N: Notifier>(
    operation: Operation,
    result: Result<(), CartError>,
    notifier: &N,
) -> Result<(), Notice> {
    let Err(e) = result else {
        return Ok(());
    };

    if e.is_expected() {
        info!("{operation:?} rejected: {e}");
    } else {
        warn!("{operation:?} failed: {e}");
    }

    let notice = Notice::new(operation, &e);
    notifier.notify(notice);
    Err(notice)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::cart::Product;
    use crate::infrastructure::memory::{InMemoryStockService, InMemoryStore};

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn notices(&self) -> Vec<Notice> {
            self.notices.lock().expect("lock").clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().expect("lock").push(notice);
        }
    }

    fn store() -> CartStore<InMemoryStockService, InMemoryStore> {
        let stock = InMemoryStockService::new();
        stock.insert(Product::new(ProductId(7)), 1);
        CartStore::new(stock, InMemoryStore::new())
    }

    #[tokio::test]
    async fn success_sends_no_notice() {
        let mut store = store();
        let notifier = RecordingNotifier::default();

        add_product(&mut store, &notifier, ProductId(7))
            .await
            .expect("add");

        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn insufficient_stock_notifies_out_of_stock() {
        let mut store = store();
        let notifier = RecordingNotifier::default();
        add_product(&mut store, &notifier, ProductId(7))
            .await
            .expect("add");

        let add = add_product(&mut store, &notifier, ProductId(7)).await;
        let update = update_product_amount(&mut store, &notifier, ProductId(7), 2).await;

        assert_eq!(add, Err(Notice::OutOfStock));
        assert_eq!(update, Err(Notice::OutOfStock));
        assert_eq!(notifier.notices(), vec![Notice::OutOfStock, Notice::OutOfStock]);
    }

    #[tokio::test]
    async fn failures_notify_operation_category() {
        let mut store = store();
        let notifier = RecordingNotifier::default();

        let add = add_product(&mut store, &notifier, ProductId(99)).await;
        let remove = remove_product(&mut store, &notifier, ProductId(7));
        let update = update_product_amount(&mut store, &notifier, ProductId(7), 1).await;

        assert_eq!(add, Err(Notice::AddFailed));
        assert_eq!(remove, Err(Notice::RemoveFailed));
        assert_eq!(update, Err(Notice::UpdateFailed));
        assert_eq!(
            notifier.notices(),
            vec![Notice::AddFailed, Notice::RemoveFailed, Notice::UpdateFailed]
        );
    }

    #[tokio::test]
    async fn ignored_amount_sends_no_notice() {
        let mut store = store();
        let notifier = RecordingNotifier::default();

        update_product_amount(&mut store, &notifier, ProductId(7), 0)
            .await
            .expect("no-op");

        assert!(notifier.notices().is_empty());
    }
}
