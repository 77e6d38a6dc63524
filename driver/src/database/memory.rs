use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnBookQuery, DependOnPatronQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnPatronModifier};
use kernel::prelude::entity::{Book, BookId, Patron, PatronId};
use kernel::KernelError;

pub use self::{book::*, patron::*};

mod book;
mod patron;

/// Library aggregate kept in process memory behind a single lock.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<LibraryTables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;

    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let tables = self.tables.clone().write_owned().await;
        tracing::debug!("exclusive transaction opened");
        Ok(InMemoryTransaction(Session::Exclusive {
            tables,
            staged: LibraryTables::default(),
        }))
    }

    async fn read_only(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let tables = self.tables.clone().read_owned().await;
        Ok(InMemoryTransaction(Session::Shared(tables)))
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl DependOnPatronQuery for InMemoryDatabase {
    type PatronQuery = InMemoryPatronRepository;
    fn patron_query(&self) -> &Self::PatronQuery {
        &InMemoryPatronRepository
    }
}

impl DependOnPatronModifier for InMemoryDatabase {
    type PatronModifier = InMemoryPatronRepository;
    fn patron_modifier(&self) -> &Self::PatronModifier {
        &InMemoryPatronRepository
    }
}

enum Session {
    Shared(OwnedRwLockReadGuard<LibraryTables>),
    Exclusive {
        tables: OwnedRwLockWriteGuard<LibraryTables>,
        staged: LibraryTables,
    },
}

/// Session over [`InMemoryDatabase`]. Dropping an exclusive session without
/// committing discards its staged writes.
pub struct InMemoryTransaction(Session);

impl InMemoryTransaction {
    fn committed(&self) -> &LibraryTables {
        match &self.0 {
            Session::Shared(tables) => &**tables,
            Session::Exclusive { tables, .. } => &**tables,
        }
    }

    fn staged(&self) -> Option<&LibraryTables> {
        match &self.0 {
            Session::Shared(_) => None,
            Session::Exclusive { staged, .. } => Some(staged),
        }
    }

    fn staged_mut(&mut self) -> error_stack::Result<&mut LibraryTables, KernelError> {
        match &mut self.0 {
            Session::Shared(_) => Err(Report::new(KernelError::Internal)
                .attach_printable("Cannot write through a read-only session")),
            Session::Exclusive { staged, .. } => Ok(staged),
        }
    }

    fn books(&self) -> View<'_, BookId, Book> {
        View {
            committed: &self.committed().books,
            staged: self.staged().map(|staged| &staged.books),
        }
    }

    fn patrons(&self) -> View<'_, PatronId, Patron> {
        View {
            committed: &self.committed().patrons,
            staged: self.staged().map(|staged| &staged.patrons),
        }
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        if let Session::Exclusive { mut tables, staged } = self.0 {
            let LibraryTables { books, patrons } = staged;
            tables.books.merge(books);
            tables.patrons.merge(patrons);
            tracing::debug!("exclusive transaction committed");
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        if let Session::Exclusive { .. } = self.0 {
            tracing::debug!("exclusive transaction rolled back");
        }
        Ok(())
    }
}

#[derive(Default)]
struct LibraryTables {
    books: Table<BookId, Book>,
    patrons: Table<PatronId, Patron>,
}

/// Rows keyed by id, iterated in insertion order.
struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V> Table<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    /// Replaces an existing row in place, or appends a new one.
    fn upsert(&mut self, key: K, value: V) {
        if self.rows.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    fn merge(&mut self, other: Table<K, V>) {
        let Table { mut rows, order } = other;
        for key in order {
            if let Some(value) = rows.remove(&key) {
                self.upsert(key, value);
            }
        }
    }
}

/// Committed rows as seen through a session's own staged writes.
struct View<'a, K, V> {
    committed: &'a Table<K, V>,
    staged: Option<&'a Table<K, V>>,
}

impl<'a, K: Clone + Eq + Hash, V: Clone> View<'a, K, V> {
    fn get(&self, key: &K) -> Option<&'a V> {
        self.staged
            .and_then(|staged| staged.get(key))
            .or_else(|| self.committed.get(key))
    }

    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn all(&self) -> Vec<V> {
        let appended = self.staged.into_iter().flat_map(|staged| {
            staged
                .order
                .iter()
                .filter(|key| !self.committed.contains(*key))
        });
        self.committed
            .order
            .iter()
            .chain(appended)
            .filter_map(|key| self.get(key))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle};
    use kernel::KernelError;

    use crate::database::{InMemoryBookRepository, InMemoryDatabase};

    fn book(id: &str, title: &str) -> Book {
        Book::new(
            BookId::new(id),
            BookTitle::new(title),
            BookAuthor::new("author"),
        )
    }

    async fn list_committed(db: InMemoryDatabase) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut session = db.read_only().await?;
        InMemoryBookRepository.find_all(&mut session).await
    }

    #[tokio::test]
    async fn staged_writes_are_hidden_until_commit() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut transaction = db.transact().await?;
        let book = book("978-1", "1984");
        InMemoryBookRepository
            .create(&mut transaction, &book)
            .await?;

        let found = InMemoryBookRepository
            .find_by_id(&mut transaction, book.id())
            .await?;
        assert_eq!(found, Some(book.clone()));

        let pending = tokio::spawn(list_committed(db.clone()));
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());
        transaction.commit().await?;

        let seen = pending.await.expect("observer task panicked")?;
        assert_eq!(seen, vec![book]);
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        {
            let mut transaction = db.transact().await?;
            InMemoryBookRepository
                .create(&mut transaction, &book("978-1", "1984"))
                .await?;
        }
        let mut transaction = db.transact().await?;
        InMemoryBookRepository
            .create(&mut transaction, &book("978-2", "Dune"))
            .await?;
        transaction.roll_back().await?;

        let mut session = db.read_only().await?;
        let books = InMemoryBookRepository.find_all(&mut session).await?;
        assert!(books.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn listing_keeps_insertion_order() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut transaction = db.transact().await?;
        for (id, title) in [("c", "C"), ("a", "A")] {
            InMemoryBookRepository
                .create(&mut transaction, &book(id, title))
                .await?;
        }
        transaction.commit().await?;

        let mut transaction = db.transact().await?;
        InMemoryBookRepository
            .create(&mut transaction, &book("b", "B"))
            .await?;
        InMemoryBookRepository
            .update(&mut transaction, &book("c", "C2"))
            .await?;
        let titles = InMemoryBookRepository
            .find_all(&mut transaction)
            .await?
            .into_iter()
            .map(|book| String::from(book.title().clone()))
            .collect::<Vec<_>>();
        assert_eq!(titles, ["C2", "A", "B"]);
        transaction.commit().await?;

        let mut session = db.read_only().await?;
        let ids = InMemoryBookRepository
            .find_all(&mut session)
            .await?
            .into_iter()
            .map(|book| String::from(book.id().clone()))
            .collect::<Vec<_>>();
        assert_eq!(ids, ["c", "a", "b"]);
        Ok(())
    }

    #[tokio::test]
    async fn read_only_session_rejects_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut session = db.read_only().await?;
        let report = InMemoryBookRepository
            .create(&mut session, &book("978-1", "1984"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        Ok(())
    }
}
