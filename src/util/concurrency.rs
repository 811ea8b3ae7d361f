use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, SendError, Sender};


pub struct Task<T: Send + 'static> {
    pub task: Box<dyn FnOnce() -> T + Send>,
    pub comm: Sender<T>,
}

impl<T: Send + 'static> Task<T> {
    pub fn run(self) {
        // The receiver goes away when the caller stops waiting for results.
        if self.comm.send((self.task)()).is_err() {
            log::trace!("Dropped a task result, nobody is listening");
        }
    }
}


pub struct ThreadPool<T: Send + 'static> {
    queue_writer: Sender<Task<T>>,
    queue_reader: Receiver<Task<T>>,
    handles: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> ThreadPool<T> {
    pub fn new() -> Self {
        let (tx, rx): (Sender<Task<T>>, Receiver<Task<T>>) = unbounded();
        return Self {
            queue_writer: tx,
            queue_reader: rx,
            handles: Vec::new(),
        }
    }

    pub fn enqueue(&self, task: Task<T>) -> Result<(), SendError<Task<T>>> {
        return self.queue_writer.send(task);
    }

    fn start_worker(&self) -> JoinHandle<()> {
        let queue = self.queue_reader.clone();
        return thread::spawn(move || {
            while let Ok(task) = queue.recv() {
                task.run()
            }
        })
    }

    pub fn init(&mut self, pool_size: usize) {
        self.handles = (0..pool_size.max(1)).map(|_| {
            self.start_worker()
        }).collect();
    }

    pub fn join(self) {
        drop(self.queue_writer);
        for handle in self.handles {
            if handle.join().is_err() {
                log::error!("A worker thread panicked");
            }
        }
    }
}


/// Runs every job on a pool of `threads` workers and returns the results in
/// the order the jobs were given.
pub fn run_ordered<T, F>(jobs: Vec<F>, threads: usize) -> Vec<T>
    where T: Send + 'static, F: FnOnce() -> T + Send + 'static
{
    let job_count = jobs.len();
    let mut pool: ThreadPool<(usize, T)> = ThreadPool::new();
    pool.init(threads.min(job_count));
    let (tx, rx) = unbounded();
    for (index, job) in jobs.into_iter().enumerate() {
        let task = Task {
            task: Box::new(move || (index, job())),
            comm: tx.clone(),
        };
        if let Err(SendError(task)) = pool.enqueue(task) {
            // Workers hold the receiving end until join, so this only runs if
            // they all died; do the work here instead.
            task.run();
        }
    }
    drop(tx);
    let mut results: Vec<(usize, T)> = rx.iter().collect();
    pool.join();
    results.sort_by_key(|(index, _)| *index);
    return results.into_iter().map(|(_, result)| result).collect();
}
