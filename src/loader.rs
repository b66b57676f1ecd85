use std::thread::{self, JoinHandle};
use std::time::Duration;

use chunkmap_geom::ChunkPos;
use chunkmap_world::{Chunk, FlatWorldBuilder, World};
use crossbeam_channel::{Receiver, TryRecvError, unbounded};

/// Streams chunks from a background thread, nearest to the origin first.
pub struct ChunkLoader {
    rx: Receiver<Chunk>,
    handle: Option<JoinHandle<()>>,
    received: usize,
    finished: bool,
}

impl ChunkLoader {
    pub fn spawn(builder: FlatWorldBuilder, delay: Duration) -> std::io::Result<Self> {
        let (tx, rx) = unbounded::<Chunk>();
        let handle = thread::Builder::new()
            .name("chunk-loader".into())
            .spawn(move || {
                let mut positions = builder.chunk_positions();
                positions.sort_by_key(|p: &ChunkPos| (p.x * p.x + p.z * p.z, p.z, p.x));
                let total = positions.len();
                log::info!(target: "loader", "loading {} chunks", total);
                for (i, pos) in positions.into_iter().enumerate() {
                    let chunk = builder.build_chunk(pos);
                    if tx.send(chunk).is_err() {
                        log::debug!(target: "loader", "receiver dropped after {} chunks", i);
                        return;
                    }
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                }
                log::info!(target: "loader", "all {} chunks sent", total);
            })?;
        Ok(Self {
            rx,
            handle: Some(handle),
            received: 0,
            finished: false,
        })
    }

    /// Move every chunk that has arrived into `world`. Returns how many.
    pub fn drain_into(&mut self, world: &mut World) -> usize {
        let mut n = 0;
        loop {
            match self.rx.try_recv() {
                Ok(chunk) => {
                    world.insert_chunk(chunk);
                    n += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.finished {
                        self.finished = true;
                        if let Some(h) = self.handle.take() {
                            if h.join().is_err() {
                                log::warn!(target: "loader", "loader thread panicked");
                            }
                        }
                    }
                    break;
                }
            }
        }
        self.received += n;
        n
    }

    /// Whether the loader has sent its last chunk and it has been drained.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn received(&self) -> usize {
        self.received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn streams_every_chunk_then_finishes() {
        let builder = FlatWorldBuilder::new().radius(2);
        let expected = builder.chunk_positions().len();
        let mut loader = ChunkLoader::spawn(builder, Duration::ZERO).unwrap();
        let mut world = World::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while !loader.is_finished() && Instant::now() < deadline {
            loader.drain_into(&mut world);
            thread::sleep(Duration::from_millis(1));
        }
        assert!(loader.is_finished());
        assert_eq!(loader.received(), expected);
        assert_eq!(world.chunk_count(), expected);
        assert!(!world.get_chunk(ChunkPos::new(2, -2)).is_empty());
    }

    #[test]
    fn origin_chunk_arrives_first() {
        let builder = FlatWorldBuilder::new().radius(3);
        let loader = ChunkLoader::spawn(builder, Duration::ZERO).unwrap();
        let first = loader.rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(first.pos, ChunkPos::new(0, 0));
    }
}
