use crossbeam_channel::unbounded;
use fxhash::FxHashSet;
use num_format::{Locale, ToFormattedString};
use tabled::Tabled;

use crate::rules::{board::Position, Side};
use crate::util::concurrency::{Task, ThreadPool};


enum PerftType {
    Node,
    CrossWin,
    NoughtWin,
    Draw,
}


/// Game-tree counts per ply. Play stops at decided positions, so a level's
/// wins and draws are the games that finished on that ply.
#[derive(Default)]
pub struct Perft {
    levels: Vec<LevelPerft>,
}

impl Perft {
    fn create_and_increment(&mut self, ply: u8, analysis_type: PerftType) {
        while self.levels.len() <= ply as usize {
            self.levels.push(Default::default());
        }
        let level = &mut self.levels[ply as usize];
        match analysis_type {
            PerftType::Node      => level.nodes += 1,
            PerftType::CrossWin  => level.cross_wins += 1,
            PerftType::NoughtWin => level.nought_wins += 1,
            PerftType::Draw      => level.draws += 1,
        };
    }

    pub fn get_levels(&self) -> &[LevelPerft] {
        return &self.levels;
    }

    pub fn total(&self) -> LevelPerft {
        let mut total = LevelPerft::default();
        self.levels.iter().for_each(|l| total.merge(l));
        return total;
    }

    pub fn get_analysis(&self) -> Vec<PrintablePerft> {
        return self.get_levels().iter().enumerate()
            .map(|(ply, l)| PrintablePerft::from_level(&ply.to_string(), l))
            .chain(std::iter::once(PrintablePerft::from_level("total", &self.total())))
            .collect();
    }

    pub fn merge(&mut self, other: &Self) {
        while self.levels.len() < other.levels.len() {
            self.levels.push(Default::default())
        }
        self.levels.iter_mut().zip(other.levels.iter()).for_each(|(level, other_level)| {
            level.merge(other_level);
        });
    }
}


#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelPerft {
    pub nodes: u64,
    pub cross_wins: u64,
    pub nought_wins: u64,
    pub draws: u64,
}

impl LevelPerft {
    pub fn merge(&mut self, other: &Self) {
        self.nodes       += other.nodes;
        self.cross_wins  += other.cross_wins;
        self.nought_wins += other.nought_wins;
        self.draws       += other.draws;
    }

    pub fn games(&self) -> u64 {
        return self.cross_wins + self.nought_wins + self.draws;
    }
}


#[derive(Tabled)]
pub struct PrintablePerft {
    pub ply: String,
    pub nodes: String,
    pub cross_wins: String,
    pub nought_wins: String,
    pub draws: String,
    pub games: String,
}

impl PrintablePerft {
    pub fn from_level(label: &str, level: &LevelPerft) -> Self {
        return Self {
            ply: String::from(label),
            nodes: level.nodes.to_formatted_string(&Locale::en),
            cross_wins: level.cross_wins.to_formatted_string(&Locale::en),
            nought_wins: level.nought_wins.to_formatted_string(&Locale::en),
            draws: level.draws.to_formatted_string(&Locale::en),
            games: level.games().to_formatted_string(&Locale::en),
        }
    }
}


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionCount {
    pub reachable: usize,
    pub canonical: usize,
}


pub struct PerftRunner {}

impl PerftRunner {
    pub fn do_threaded_perft(position: Position, threads: usize) -> Perft {
        let mut result: Perft = Default::default();
        if position.is_terminal().decided {
            return Self::do_perft(position);
        }
        result.create_and_increment(position.get_ply(), PerftType::Node);
        let mut thread_pool = ThreadPool::new();
        thread_pool.init(threads);
        let (tx, rx) = unbounded();
        for m in position.legal_moves() {
            let child = position.apply(m);
            let task = Task {
                task: Box::new(move || Self::perft(child)),
                comm: tx.clone(),
            };
            if let Err(e) = thread_pool.enqueue(task) {
                log::warn!("Perft worker queue closed, counting on this thread");
                e.0.run();
            }
        }
        drop(tx);
        while let Ok(node_result) = rx.recv() {
            result.merge(&node_result);
        };
        thread_pool.join();
        return result;
    }

    pub fn do_perft(position: Position) -> Perft {
        return Self::perft(position);
    }

    fn perft(position: Position) -> Perft {
        let mut result: Perft = Default::default();
        Self::count(position, &mut result);
        return result;
    }

    fn count(position: Position, result: &mut Perft) {
        let ply = position.get_ply();
        result.create_and_increment(ply, PerftType::Node);
        if position.is_terminal().decided {
            match position.winner() {
                Some(Side::Cross) => result.create_and_increment(ply, PerftType::CrossWin),
                Some(Side::Nought) => result.create_and_increment(ply, PerftType::NoughtWin),
                None => result.create_and_increment(ply, PerftType::Draw),
            }
            return;
        }
        for m in position.legal_moves() {
            Self::count(position.apply(m), result);
        }
    }

    /// Distinct positions reachable from `position`, with and without folding
    /// rotations and reflections together.
    pub fn count_positions(position: Position) -> PositionCount {
        let mut seen: FxHashSet<u32> = Default::default();
        Self::collect_positions(position, &mut seen);
        let canonical: FxHashSet<u32> = seen.iter()
            .filter_map(|key| Position::from_squares((key & 0x1ff) as u16, (key >> 9) as u16).ok())
            .map(|p| p.canonical_key())
            .collect();
        return PositionCount { reachable: seen.len(), canonical: canonical.len() };
    }

    fn collect_positions(position: Position, seen: &mut FxHashSet<u32>) {
        if !seen.insert(position.key()) {
            return;
        }
        if position.is_terminal().decided {
            return;
        }
        for m in position.legal_moves() {
            Self::collect_positions(position.apply(m), seen);
        }
    }
}
