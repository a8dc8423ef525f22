use crossbeam_channel::{Receiver, Sender, unbounded};

/// The queue pair decoupling candidate generation from evaluation.
///
/// The pending queue is single-producer/multi-consumer: the generation task
/// holds the only sender, each worker a cloned receiver. Dropping the sender
/// is the "generation finished" signal; a worker blocked on an empty queue
/// wakes and terminates when it sees the disconnect. The completed queue is
/// the mirror image: every worker holds a cloned sender, the scheduler drains
/// the single receiver until the last worker is gone.
///
/// Channels are unbounded, so the generator never blocks and each candidate
/// passes through each queue exactly once.
pub(crate) struct CandidateStream<T, R> {
    pub(crate) pending_tx: Sender<T>,
    pub(crate) pending_rx: Receiver<T>,
    pub(crate) completed_tx: Sender<R>,
    pub(crate) completed_rx: Receiver<R>,
}

impl<T, R> CandidateStream<T, R> {
    pub(crate) fn new() -> Self {
        let (pending_tx, pending_rx) = unbounded();
        let (completed_tx, completed_rx) = unbounded();
        Self {
            pending_tx,
            pending_rx,
            completed_tx,
            completed_rx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn workers_terminate_on_producer_disconnect() {
        let stream: CandidateStream<u64, u64> = CandidateStream::new();
        let CandidateStream {
            pending_tx,
            pending_rx,
            completed_tx,
            completed_rx,
        } = stream;

        thread::scope(|scope| {
            for _ in 0..4 {
                let rx = pending_rx.clone();
                let tx = completed_tx.clone();
                scope.spawn(move || {
                    while let Ok(n) = rx.recv() {
                        tx.send(n).unwrap();
                    }
                });
            }
            drop(pending_rx);
            drop(completed_tx);

            for n in 0..100u64 {
                pending_tx.send(n).unwrap();
            }
            drop(pending_tx);

            let received: HashSet<u64> = completed_rx.iter().collect();
            assert_eq!(received.len(), 100);
        });
    }

    #[test]
    fn nothing_is_lost_or_duplicated_across_repeated_runs() {
        for _ in 0..20 {
            let stream: CandidateStream<u64, u64> = CandidateStream::new();
            let CandidateStream {
                pending_tx,
                pending_rx,
                completed_tx,
                completed_rx,
            } = stream;

            thread::scope(|scope| {
                for _ in 0..4 {
                    let rx = pending_rx.clone();
                    let tx = completed_tx.clone();
                    scope.spawn(move || {
                        while let Ok(n) = rx.recv() {
                            tx.send(n).unwrap();
                        }
                    });
                }
                drop(pending_rx);
                drop(completed_tx);

                scope.spawn(move || {
                    for n in 0..250u64 {
                        pending_tx.send(n).unwrap();
                    }
                });

                let mut received: Vec<u64> = completed_rx.iter().collect();
                received.sort_unstable();
                assert_eq!(received, (0..250).collect::<Vec<_>>());
            });
        }
    }
}
