// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
//! Bounded blocking queue between producer threads and pull-based consumers.
//!
//! Responsibilities:
//! - Stages items produced by per-stream background threads in a fixed-size
//!   ring buffer, blocking producers when the ring is full and consumers when
//!   it is empty.
//! - Tears down producer threads deterministically on `close`.
//!
//! Key exported interfaces:
//! - Types: `BlockingQueue`.
//!
//! Current limitations:
//! - `close` joins producer threads, so a producer stuck inside a blocking
//!   supplier call (e.g. a network read) delays shutdown until that call
//!   returns. Cancellation of the underlying I/O must come from the stream
//!   itself.

use std::iter;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use crate::flightline_logging::debug;

struct QueueState<T> {
    ring: Vec<Option<T>>,
    size: usize,
    head: usize,
    tail: usize,
    closed: bool,
    active_producers: usize,
}

struct QueueShared<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> QueueShared<T> {
    fn push(&self, item: T) {
        let state = self.state.lock().expect("blocking queue lock");
        let mut state = self
            .not_full
            .wait_while(state, |s| !s.closed && s.size == s.ring.len())
            .expect("blocking queue not_full wait");
        if state.closed {
            return;
        }
        let tail = state.tail;
        state.ring[tail] = Some(item);
        state.tail = (state.tail + 1) % state.ring.len();
        state.size += 1;
        self.not_empty.notify_one();
    }

    // A producer is allowed to call its supplier only once there is room for
    // the result, so at most `capacity` supplier results are in flight.
    fn wait_until_can_push_or_closed(&self) -> bool {
        let state = self.state.lock().expect("blocking queue lock");
        let state = self
            .not_full
            .wait_while(state, |s| !s.closed && s.size == s.ring.len())
            .expect("blocking queue not_full wait");
        !state.closed
    }
}

/// Fixed-capacity MPSC staging buffer with close/drain semantics.
///
/// Producers registered through [`BlockingQueue::add_producer`] run on
/// dedicated threads and block while the ring is full; `pop` blocks while the
/// ring is empty and at least one producer is still running. Once every
/// producer has finished and the ring is drained, `pop` returns `None`.
pub struct BlockingQueue<T> {
    shared: Arc<QueueShared<T>>,
    workers: Mutex<Vec<thread::JoinHandle<()>>>,
}

impl<T> BlockingQueue<T> {
    /// Create a queue with room for `capacity` undelivered items.
    ///
    /// Panics if `capacity` is zero; a zero-capacity queue could never make
    /// progress.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "blocking queue capacity must be positive");
        Self {
            shared: Arc::new(QueueShared {
                state: Mutex::new(QueueState {
                    ring: iter::repeat_with(|| None).take(capacity).collect(),
                    size: 0,
                    head: 0,
                    tail: 0,
                    closed: false,
                    active_producers: 0,
                }),
                not_empty: Condvar::new(),
                not_full: Condvar::new(),
            }),
            workers: Mutex::new(Vec::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        let state = self.shared.state.lock().expect("blocking queue lock");
        state.ring.len()
    }

    pub fn len(&self) -> usize {
        let state = self.shared.state.lock().expect("blocking queue lock");
        state.size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawn a producer thread that repeatedly pulls items from `supplier`
    /// and pushes them into the queue.
    ///
    /// The thread exits when the supplier returns `None` (its stream is
    /// exhausted) or the queue is closed. When the last producer exits, any
    /// consumer blocked on an empty queue is released.
    pub fn add_producer<F>(&self, mut supplier: F)
    where
        T: Send + 'static,
        F: FnMut() -> Option<T> + Send + 'static,
    {
        {
            let mut state = self.shared.state.lock().expect("blocking queue lock");
            state.active_producers += 1;
        }
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("flightline-producer".to_string())
            .spawn(move || {
                loop {
                    if !shared.wait_until_can_push_or_closed() {
                        break;
                    }
                    let Some(item) = supplier() else {
                        break;
                    };
                    shared.push(item);
                }

                let mut state = shared.state.lock().expect("blocking queue lock");
                state.active_producers -= 1;
                // The queue may be empty with a consumer parked on it; the
                // last producer leaving is what lets it observe end-of-data.
                shared.not_empty.notify_all();
            })
            .expect("spawn blocking queue producer thread");
        self.workers
            .lock()
            .expect("blocking queue workers lock")
            .push(handle);
    }

    /// Insert one item, blocking while the ring is full.
    ///
    /// Returns without inserting if the queue has been closed.
    pub fn push(&self, item: T) {
        self.shared.push(item);
    }

    /// Remove the oldest item, blocking while the queue is empty and at
    /// least one producer is still running.
    ///
    /// Returns `None` when the queue is closed, or when it has drained and
    /// no producer remains to refill it.
    pub fn pop(&self) -> Option<T> {
        let state = self.shared.state.lock().expect("blocking queue lock");
        let mut state = self
            .shared
            .not_empty
            .wait_while(state, |s| {
                !s.closed && s.size == 0 && s.active_producers > 0
            })
            .expect("blocking queue not_empty wait");
        if state.closed || state.size == 0 {
            return None;
        }
        let head = state.head;
        let item = state.ring[head].take();
        state.head = (state.head + 1) % state.ring.len();
        state.size -= 1;
        self.shared.not_full.notify_one();
        item
    }

    /// Close the queue and join every producer thread. Idempotent.
    ///
    /// Waiters blocked in `push`/`pop` wake immediately and observe the
    /// closed state; items still in the ring are dropped unread.
    pub fn close(&self) {
        {
            let mut state = self.shared.state.lock().expect("blocking queue lock");
            if state.closed {
                return;
            }
            state.closed = true;
            self.shared.not_empty.notify_all();
            self.shared.not_full.notify_all();
        }
        debug!("blocking queue closed, joining producer threads");
        let workers = {
            let mut workers = self.workers.lock().expect("blocking queue workers lock");
            std::mem::take(&mut *workers)
        };
        for handle in workers {
            let _ = handle.join();
        }
    }
}

impl<T> Drop for BlockingQueue<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    #[test]
    fn drains_then_stops() {
        let queue = BlockingQueue::new(2);
        let mut remaining = vec![1, 2];
        remaining.reverse();
        queue.add_producer(move || remaining.pop());

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_is_a_caller_bug() {
        let _ = BlockingQueue::<i32>::new(0);
    }

    #[test]
    fn pop_without_producers_returns_none() {
        let queue = BlockingQueue::<i32>::new(1);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let queue = Arc::new(BlockingQueue::new(3));
        for producer in 0..4u64 {
            let mut next = 0u64;
            queue.add_producer(move || {
                if next == 64 {
                    return None;
                }
                next += 1;
                Some(producer * 1000 + next)
            });
        }
        let mut seen = 0;
        while let Some(_item) = queue.pop() {
            assert!(queue.len() <= 3);
            seen += 1;
        }
        assert_eq!(seen, 4 * 64);
    }

    #[test]
    fn close_unblocks_full_push() {
        let queue = Arc::new(BlockingQueue::new(1));
        queue.push(1);

        let (tx, rx) = mpsc::channel();
        let queue_clone = Arc::clone(&queue);
        let pusher = thread::spawn(move || {
            queue_clone.push(2);
            let _ = tx.send(());
        });
        // Give the pusher time to park on the full ring.
        thread::sleep(Duration::from_millis(50));
        queue.close();

        assert!(rx.recv_timeout(Duration::from_millis(500)).is_ok());
        pusher.join().expect("join pusher");
        // The blocked push observed the close and inserted nothing.
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn close_unblocks_empty_pop() {
        let queue = Arc::new(BlockingQueue::<i32>::new(1));
        // Keep one producer alive inside its supplier so the consumer has a
        // reason to wait.
        queue.add_producer(|| {
            thread::sleep(Duration::from_millis(300));
            None
        });

        let queue_clone = Arc::clone(&queue);
        let consumer = thread::spawn(move || {
            let started = Instant::now();
            let item = queue_clone.pop();
            (item, started.elapsed())
        });
        thread::sleep(Duration::from_millis(50));
        queue.close();

        let (item, waited) = consumer.join().expect("join consumer");
        assert_eq!(item, None);
        // The pop returned on close, not when the producer finally exited.
        assert!(waited < Duration::from_millis(250), "pop waited {waited:?}");
    }

    #[test]
    fn close_is_idempotent() {
        let queue = BlockingQueue::new(2);
        let mut remaining = vec![7];
        queue.add_producer(move || remaining.pop());
        queue.close();
        queue.close();
        // Use after close is a safe no-op.
        queue.push(1);
        assert_eq!(queue.pop(), None);
    }
}
