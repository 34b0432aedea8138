//! Scoped transactions.
//!
//! Every read-then-write of inventory happens inside
//! [`Database::write_transaction`]. The transaction begins IMMEDIATE, so the
//! store's write lock is taken before the first read and held until commit.
//! The closure's `Ok` commits; any other exit (an `Err`, an early `?`, a
//! panic unwinding through the scope) drops the `rusqlite::Transaction`,
//! which rolls back.

use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{is_busy, Error, Result};

use super::connection::Database;

impl Database {
    /// Runs `f` inside an IMMEDIATE transaction and commits if it succeeds.
    ///
    /// A busy or locked store anywhere in the scope, including while
    /// waiting to begin, is reported as [`Error::LockTimeout`].
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a database error if the transaction
    /// cannot be started or committed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seatwise::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/seatwise.db")).unwrap();
    /// let flights: i64 = db
    ///     .write_transaction(|tx| {
    ///         Ok(tx.query_row("SELECT COUNT(*) FROM flights", [], |row| row.get(0))?)
    ///     })
    ///     .unwrap();
    /// ```
    pub fn write_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let waited = self.busy_timeout();
        run_scoped(&mut self.conn, TransactionBehavior::Immediate, f)
            .map_err(|e| lock_timeout(e, waited))
    }

    /// Runs `f` inside a DEFERRED transaction for a consistent snapshot
    /// across several reads. Nothing is written; the transaction is rolled
    /// back when the scope ends.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a database error if the transaction
    /// cannot be started.
    pub fn read_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let waited = self.busy_timeout();
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| lock_timeout(e.into(), waited))?;
        f(&tx).map_err(|e| lock_timeout(e, waited))
    }
}

fn run_scoped<T, F>(conn: &mut Connection, behavior: TransactionBehavior, f: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    let tx = conn.transaction_with_behavior(behavior)?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}

fn lock_timeout(err: Error, waited: Duration) -> Error {
    match err {
        Error::Database(ref e) if is_busy(e) => {
            log::warn!("gave up waiting for the database lock after {waited:?}");
            Error::LockTimeout { waited }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::database::DatabaseConfig;
    use tempfile::tempdir;

    fn count_flights(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM flights", [], |row| row.get(0))
            .unwrap()
    }

    const INSERT: &str = "INSERT INTO flights (flight_number, origin, destination, depart_time, \
                          arrive_time, capacity, available_seats, price_cents) \
                          VALUES ('SW1', 'A', 'B', 0, 0, 5, 5, 100)";

    #[test]
    fn test_write_transaction_commits_on_ok() {
        let mut db = create_test_database();
        db.write_transaction(|tx| {
            tx.execute(INSERT, [])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(count_flights(db.connection()), 1);
    }

    #[test]
    fn test_write_transaction_rolls_back_on_err() {
        let mut db = create_test_database();
        let result: Result<()> = db.write_transaction(|tx| {
            tx.execute(INSERT, [])?;
            Err(Error::invalid("seats", "abort"))
        });
        assert!(matches!(result, Err(Error::InvalidRequest { .. })));
        assert_eq!(count_flights(db.connection()), 0);
    }

    #[test]
    fn test_write_transaction_rolls_back_on_panic() {
        let mut db = create_test_database();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<()> = db.write_transaction(|tx| {
                tx.execute(INSERT, []).unwrap();
                panic!("boom");
            });
        }));
        assert!(outcome.is_err());
        assert_eq!(count_flights(db.connection()), 0);
    }

    #[test]
    fn test_write_transaction_maps_busy_to_lock_timeout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let config = DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50));

        let mut holder = Database::open(config.clone()).unwrap();
        let mut waiter = Database::open(config).unwrap();

        let err = holder
            .write_transaction(|_| {
                let inner: Result<()> = waiter.write_transaction(|_| Ok(()));
                Ok(inner.unwrap_err())
            })
            .unwrap();

        assert!(matches!(err, Error::LockTimeout { waited } if waited == Duration::from_millis(50)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_read_transaction_sees_committed_rows() {
        let mut db = create_test_database();
        db.write_transaction(|tx| {
            tx.execute(INSERT, [])?;
            Ok(())
        })
        .unwrap();

        let count = db
            .read_transaction(|tx| Ok(count_flights(tx)))
            .unwrap();
        assert_eq!(count, 1);
    }
}
