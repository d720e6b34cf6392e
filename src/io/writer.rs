use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWrite;
use tokio_stream::StreamExt;

use crate::banking::Transaction;

/// Interface for a statement writer
#[async_trait(?Send)]
pub trait StatementWriter {
  /// Write the transactions provided by the [`Iterator`] and return whether the operation was successful or not.
  async fn write_statement<'a, T>(&'a mut self, statement: T) -> Result<()>
  where
    T: Iterator<Item = Transaction> + 'a;
}

/// An implementation of [`StatementWriter`] for the CSV format.
pub struct CsvStatementWriter<W>(W);

impl<W> CsvStatementWriter<W>
where
  W: AsyncWrite + Unpin,
{
  pub fn new(writer: W) -> Self {
    Self(writer)
  }
}

#[async_trait(?Send)]
impl<W> StatementWriter for CsvStatementWriter<W>
where
  W: AsyncWrite + Unpin,
{
  async fn write_statement<'a, T>(&'a mut self, statement: T) -> Result<()>
  where
    T: Iterator<Item = Transaction> + 'a,
  {
    let mut statement = Box::pin(tokio_stream::iter(
      statement.map(super::statement::StatementRow::from),
    ));

    let mut serializer = csv_async::AsyncSerializer::from_writer(&mut self.0);
    while let Some(row) = statement.next().await {
      serializer.serialize(row).await?;
    }
    serializer.flush().await?;
    Ok(())
  }
}
