//! Chunked, concurrent reading of measurement files.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::{Bytes, BytesMut};
use tokio::{fs::File, sync::mpsc};
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, FramedRead};
use tracing::{debug, info};

use crate::convert::Unit;
use crate::error::IngestError;
use crate::parser::{parse_chunk, ChunkRecords};
use crate::series::{Sample, TemperatureSeries};
use crate::table::StationTable;

// Tokio MAX_BUF for blocking IO: https://github.com/tokio-rs/tokio/blob/master/tokio/src/io/blocking.rs#L26
pub const BUFFER_SIZE: usize = 2 * 1024 * 1024;

/// A newline-aligned slice of the input file.
#[derive(Debug)]
pub struct Chunk {
    pub index: usize,
    pub first_line: usize,
    pub bytes: Bytes,
}

/// Splits a byte stream into chunks that end on a line boundary.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    next_index: usize,
    lines_seen: usize,
}

impl ChunkDecoder {
    fn emit(&mut self, bytes: BytesMut) -> Chunk {
        let chunk = Chunk {
            index: self.next_index,
            first_line: self.lines_seen + 1,
            bytes: bytes.freeze(),
        };
        self.next_index += 1;
        self.lines_seen += memchr::memchr_iter(b'\n', &chunk.bytes).count();
        chunk
    }
}

impl Decoder for ChunkDecoder {
    type Item = Chunk;
    type Error = std::io::Error;

    #[inline]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match memchr::memrchr(b'\n', src) {
            Some(index) => {
                let data = src.split_to(index + 1);
                Ok(Some(self.emit(data)))
            }
            None => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(chunk) = self.decode(src)? {
            return Ok(Some(chunk));
        }
        if src.is_empty() {
            Ok(None)
        } else {
            let data = src.split_to(src.len());
            Ok(Some(self.emit(data)))
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> IngestError + '_ {
    move |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads `path` and returns one series per station, sorted by label.
///
/// Chunks are parsed on the blocking pool and merged strictly in file
/// order, so each station's samples keep the order they appear in.
pub async fn read_measurements(
    path: impl AsRef<Path>,
    unit: Unit,
) -> Result<Vec<(String, TemperatureSeries)>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).await.map_err(io_error(path))?;

    let (tx, mut rx) = mpsc::unbounded_channel::<(usize, Result<ChunkRecords, IngestError>)>();
    let mut framed = FramedRead::with_capacity(file, ChunkDecoder::default(), BUFFER_SIZE);
    let reader = tokio::spawn(async move {
        let mut chunks = 0usize;
        while let Some(chunk) = framed.next().await {
            let chunk = chunk?;
            let tx = tx.clone();
            chunks += 1;
            tokio::task::spawn_blocking(move || {
                let parsed = parse_chunk(&chunk.bytes, chunk.first_line);
                debug!(
                    chunk = chunk.index,
                    bytes = chunk.bytes.len(),
                    stations = parsed.as_ref().map_or(0, |records| records.len()),
                    "parsed chunk"
                );
                // The receiver only goes away once ingestion has already failed.
                let _ = tx.send((chunk.index, parsed));
            });
        }
        Ok::<usize, std::io::Error>(chunks)
    });

    let merger = tokio::task::spawn_blocking(move || {
        let mut merged: StationTable<Vec<Sample>> = StationTable::new();
        let mut pending = BTreeMap::new();
        let mut next = 0usize;
        while let Some((index, parsed)) = rx.blocking_recv() {
            pending.insert(index, parsed);
            // Errors surface in file order, not completion order.
            while let Some(records) = pending.remove(&next) {
                for (station, samples) in records?.into_entries() {
                    merged.get_or_insert_with(&station, Vec::new).extend(samples);
                }
                next += 1;
            }
        }
        Ok::<_, IngestError>((merged, next))
    });

    let chunks = reader
        .await
        .map_err(|e| IngestError::Task(e.to_string()))?
        .map_err(io_error(path))?;
    let (merged, merged_chunks) = merger
        .await
        .map_err(|e| IngestError::Task(e.to_string()))??;
    if merged_chunks != chunks {
        return Err(IngestError::Task(format!(
            "merged {merged_chunks} of {chunks} chunks"
        )));
    }

    let mut stations = merged
        .into_entries()
        .map(|(station, samples)| match TemperatureSeries::new(unit, samples) {
            Ok(series) => Ok((station, series)),
            Err(source) => Err(IngestError::Series { station, source }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    stations.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    info!(
        path = %path.display(),
        chunks,
        stations = stations.len(),
        "read measurements"
    );
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_splits_on_last_newline() {
        let mut decoder = ChunkDecoder::default();
        let mut src = BytesMut::from(&b"a;2023-06-01;1\nb;2023-06-01;2\nc;20"[..]);
        let chunk = decoder.decode(&mut src).unwrap().unwrap();
        assert_eq!(&chunk.bytes[..], b"a;2023-06-01;1\nb;2023-06-01;2\n");
        assert_eq!(chunk.first_line, 1);
        assert_eq!(&src[..], b"c;20");
        assert!(decoder.decode(&mut src).unwrap().is_none());

        src.extend_from_slice(b"23-06-01;3");
        let tail = decoder.decode_eof(&mut src).unwrap().unwrap();
        assert_eq!(tail.index, 1);
        assert_eq!(tail.first_line, 3);
        assert_eq!(&tail.bytes[..], b"c;2023-06-01;3");
        assert!(decoder.decode_eof(&mut src).unwrap().is_none());
    }
}
