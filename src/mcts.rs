//! Monte Carlo Tree Search (MCTS) over a [`Game`].
//!
//! Each iteration walks a single path from the root:
//! - a node seen for the first time is evaluated with a random playout
//! - a node seen again gets its children materialized (once), then the walk
//!   descends into an unvisited child while any remain, otherwise into the
//!   child with the highest score
//! - every node on the path is then updated with the playout result
//!
//! The score of a visited node is
//! `wins / visits + c * ln(total_simulations) / visits`.
//! There is deliberately no square root around the exploration term, and the
//! statistics are kept as `f64`; this is not textbook UCB1.
//!
//! The final answer is the most visited child of the root.

use std::cmp::Ordering;

use fastrand::Rng;
use log::{debug, log_enabled, trace, Level};
use thiserror::Error;

use crate::board::Color;
use crate::constants::{EXPLORATION, N_SIMS, UNVISITED_SCORE};
use crate::game::Game;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// None of the legal root moves reproduces the chosen child's position.
    /// `legal_moves` and `apply` disagree with each other.
    #[error("no legal move reproduces the position of root child {child}")]
    ActionReconstructionMismatch { child: usize },
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// Parameters of one move decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Number of simulations (iteration budget `N`).
    pub simulations: usize,
    /// Exploration weight `c`.
    pub exploration: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: N_SIMS,
            exploration: EXPLORATION,
        }
    }
}

impl SearchConfig {
    pub fn new(simulations: usize, exploration: f64) -> Self {
        Self {
            simulations,
            exploration,
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration.is_finite() {
            return Err(SearchError::InvalidConfig(format!(
                "exploration weight must be finite, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

/// A node in the search tree. A parent owns its children.
#[derive(Debug, Clone)]
pub struct TreeNode<P> {
    /// The position at this node
    pub pos: P,
    /// Simulations that passed through this node
    pub visits: f64,
    /// Of those, simulations won by the searching side
    pub wins: f64,
    /// Cached selection score, [`UNVISITED_SCORE`] until the first update
    pub score: f64,
    /// One child per legal move; enumeration order until first shuffled
    pub children: Vec<TreeNode<P>>,
    expanded: bool,
}

impl<P> TreeNode<P> {
    /// Create a new tree node with empty statistics.
    pub fn new(pos: P) -> Self {
        Self {
            pos,
            visits: 0.0,
            wins: 0.0,
            score: UNVISITED_SCORE,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Whether the children of this node have been materialized.
    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Calculate the winrate for this node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0.0 {
            self.wins / self.visits
        } else {
            -0.1 // Indicate unvisited
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Tear down the subtree, children before their parent.
    ///
    /// Returns the number of nodes released.
    pub fn release(self) -> usize {
        let TreeNode { children, .. } = self;
        children.into_iter().map(TreeNode::release).sum::<usize>() + 1
    }

    fn update(&mut self, value: f64, total: f64, weight: f64) {
        self.visits += 1.0;
        self.wins += value;
        self.score = self.wins / self.visits + weight * total.ln() / self.visits;
    }
}

/// Result of [`tree_search`]: the chosen move plus the finished tree.
pub struct SearchOutcome<G: Game> {
    /// Most visited root move, `None` if the side to move has no legal move
    pub best: Option<G::Move>,
    pub root: TreeNode<G::Position>,
    /// Child indices chosen from the root in every iteration
    pub paths: Vec<Vec<usize>>,
}

/// Number of simulations completed in the current search.
#[derive(Debug, Default, Clone, Copy)]
struct SimulationCounter(usize);

impl SimulationCounter {
    #[inline]
    fn increment(&mut self) {
        self.0 += 1;
    }

    #[inline]
    fn get(self) -> usize {
        self.0
    }
}

/// State of a single move decision.
struct Search<'a, G: Game> {
    game: &'a G,
    rng: &'a mut Rng,
    favored: Color,
    weight: f64,
    counter: SimulationCounter,
    path: Vec<usize>,
    favored_space: Vec<G::Move>,
    opponent_space: Vec<G::Move>,
    history: Option<Vec<Vec<usize>>>,
}

impl<'a, G: Game> Search<'a, G> {
    fn new(game: &'a G, favored: Color, weight: f64, rng: &'a mut Rng) -> Self {
        Self {
            game,
            rng,
            favored,
            weight,
            counter: SimulationCounter::default(),
            path: Vec::new(),
            favored_space: game.move_space(favored),
            opponent_space: game.move_space(favored.opponent()),
            history: None,
        }
    }

    fn side(&self, favored_to_move: bool) -> Color {
        if favored_to_move {
            self.favored
        } else {
            self.favored.opponent()
        }
    }

    fn expand(&self, node: &mut TreeNode<G::Position>, side: Color) {
        node.children = self
            .game
            .legal_moves(&node.pos, side)
            .into_iter()
            .map(|(_, after)| TreeNode::new(after))
            .collect();
        node.expanded = true;
    }

    /// Pick the child to descend into.
    ///
    /// While some child is unvisited only unvisited children are candidates.
    /// The child list itself is shuffled first, so ties fall to a random child
    /// and the new order carries over to later scans of this node.
    fn select_child(&mut self, node: &mut TreeNode<G::Position>) -> Option<usize> {
        let explored = node.children.iter().filter(|c| c.visits > 0.0).count();

        if explored < node.children.len() {
            self.rng.shuffle(&mut node.children);
            highest_score(&node.children, |c| c.visits == 0.0)
        } else {
            highest_score(&node.children, |_| true)
        }
    }

    /// Run one selection / expansion / simulation / backpropagation cycle.
    fn iterate(&mut self, root: &mut TreeNode<G::Position>) {
        self.path.clear();
        let mut favored_to_move = true;
        let mut node = &mut *root;

        loop {
            if node.visits == 0.0 {
                break;
            }
            if !node.expanded {
                let side = self.side(favored_to_move);
                self.expand(node, side);
            }
            let Some(idx) = self.select_child(node) else {
                // No legal continuation: evaluate this node itself
                break;
            };
            self.path.push(idx);
            favored_to_move = !favored_to_move;
            node = &mut node.children[idx];
        }

        let win = self.simulate(&node.pos, favored_to_move);
        trace!(
            "simulation {} path {:?} win={}",
            self.counter.get(),
            self.path,
            win
        );
        if let Some(history) = self.history.as_mut() {
            history.push(self.path.clone());
        }
        self.backpropagate(root, win);
    }

    /// Play random placements from `pos` until a side is stuck.
    ///
    /// Returns whether the searching side won.
    fn simulate(&mut self, pos: &G::Position, favored_to_move: bool) -> bool {
        let game = self.game;
        let mut board = pos.clone();
        let mut favored_turn = favored_to_move;

        loop {
            let space = if favored_turn {
                &mut self.favored_space
            } else {
                &mut self.opponent_space
            };
            self.rng.shuffle(space);
            match space.iter().find_map(|&mv| game.apply(mv, &board)) {
                Some(after) => {
                    board = after;
                    favored_turn = !favored_turn;
                }
                None => break,
            }
        }

        self.counter.increment();
        // The side to move has no placement left and loses
        !favored_turn
    }

    /// Update the root and every node on the recorded path.
    fn backpropagate(&mut self, root: &mut TreeNode<G::Position>, win: bool) {
        let value = if win { 1.0 } else { 0.0 };
        let total = self.counter.get() as f64;
        let weight = self.weight;

        root.update(value, total, weight);
        let mut node = root;
        for &idx in &self.path {
            node = &mut node.children[idx];
            node.update(value, total, weight);
        }

        self.path.clear();
    }
}

/// Index of the candidate with the greatest score; the first one wins ties.
fn highest_score<P>(children: &[TreeNode<P>], candidate: impl Fn(&TreeNode<P>) -> bool) -> Option<usize> {
    children
        .iter()
        .enumerate()
        .filter(|(_, c)| candidate(c))
        .rev()
        .max_by(|(_, a), (_, b)| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
}

/// Find the most visited child; the first one in the current order wins ties.
fn most_visited<P>(root: &TreeNode<P>) -> Option<usize> {
    root.children
        .iter()
        .enumerate()
        .rev()
        .max_by(|(_, a), (_, b)| a.visits.partial_cmp(&b.visits).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
}

fn run<G: Game>(
    game: &G,
    pos: &G::Position,
    side: Color,
    config: &SearchConfig,
    rng: &mut Rng,
    record: bool,
) -> Result<SearchOutcome<G>, SearchError> {
    config.validate()?;

    let mut root = TreeNode::new(pos.clone());
    let mut search = Search::new(game, side, config.exploration, rng);
    if record {
        search.history = Some(Vec::with_capacity(config.simulations));
    }

    search.expand(&mut root, side);
    if root.children.is_empty() {
        debug!("{side} has no legal move, skipping search");
        return Ok(SearchOutcome {
            best: None,
            root,
            paths: search.history.unwrap_or_default(),
        });
    }

    while search.counter.get() < config.simulations {
        search.iterate(&mut root);
    }

    let Some(best) = most_visited(&root) else {
        return Ok(SearchOutcome {
            best: None,
            root,
            paths: search.history.unwrap_or_default(),
        });
    };

    if log_enabled!(Level::Debug) {
        dump_children(&root);
    }
    debug!(
        "{} simulations, {} nodes, best child {} (v={} wr={:.3})",
        search.counter.get(),
        root.node_count(),
        best,
        root.children[best].visits,
        root.children[best].winrate()
    );

    let chosen = &root.children[best].pos;
    let mv = game
        .legal_moves(pos, side)
        .into_iter()
        .find(|(_, after)| after == chosen)
        .map(|(mv, _)| mv)
        .ok_or(SearchError::ActionReconstructionMismatch { child: best })?;

    Ok(SearchOutcome {
        best: Some(mv),
        root,
        paths: search.history.unwrap_or_default(),
    })
}

/// Run a search and hand back the finished tree alongside the chosen move.
///
/// Every iteration's path is recorded in [`SearchOutcome::paths`]. The caller
/// owns the tree and should [`release`](TreeNode::release) it when done.
pub fn tree_search<G: Game>(
    game: &G,
    pos: &G::Position,
    side: Color,
    config: &SearchConfig,
    rng: &mut Rng,
) -> Result<SearchOutcome<G>, SearchError> {
    run(game, pos, side, config, rng, true)
}

/// Choose a move for `side` at `pos`.
///
/// Returns `Ok(None)` when `side` has no legal placement. The tree is built
/// from scratch and released before returning.
pub fn select_move<G: Game>(
    game: &G,
    pos: &G::Position,
    side: Color,
    config: &SearchConfig,
    rng: &mut Rng,
) -> Result<Option<G::Move>, SearchError> {
    let outcome = run(game, pos, side, config, rng, false)?;
    let released = outcome.root.release();
    trace!("released {released} nodes");
    Ok(outcome.best)
}

/// Log statistics for the root's children.
pub fn dump_children<P>(root: &TreeNode<P>) {
    for (i, child) in root.children.iter().enumerate() {
        debug!(
            "child {} v={} w={} wr={:.3} score={:.3}",
            i,
            child.visits,
            child.wins,
            child.winrate(),
            child.score
        );
    }
}
