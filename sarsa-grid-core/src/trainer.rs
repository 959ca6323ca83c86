//! Train [`SarsaAgent`] with an [`Engine`].
mod config;
use crate::{
    record::{AggregateRecorder, RecordValue::Scalar},
    Engine, Evaluator, GridEnv, SarsaAgent,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::info;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop.
///
/// # Training loop
///
/// 1. Run an episode with [`Engine::run_one_episode`]. Stop if the engine is stopped.
/// 2. `episodes += 1`; the summary of the episode becomes a record.
/// 3. If `episodes % eval_interval == 0`, evaluate the greedy policy of the agent and
///    add the result to the record.
/// 4. Store the record in the recorder.
/// 5. If `episodes % flush_record_interval == 0`, flush the recorder.
/// 6. If `episodes == max_episodes`, finish. Otherwise back to 1.
///
/// Records left unflushed are flushed at the end.
///
/// ```mermaid
/// graph LR
///     A[Engine]-->|EpisodeSummary|B[Trainer]
///     B-->|Record|C[AggregateRecorder]
///     B-->|SarsaAgent|D[Evaluator]
///     D-->|Record|B
/// ```
pub struct Trainer {
    max_episodes: usize,
    flush_record_interval: usize,
    eval_interval: usize,
}

fn is_multiple(n: usize, interval: usize) -> bool {
    interval > 0 && n % interval == 0
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            max_episodes: config.max_episodes,
            flush_record_interval: config.flush_record_interval,
            eval_interval: config.eval_interval,
        }
    }

    /// Trains the agent of `engine`.
    ///
    /// Returns the number of episodes run, less than `max_episodes` if the engine
    /// stopped.
    ///
    /// An episode ends on a goal or penalty cell, when blocked, or at the
    /// `max_episode_steps` of the engine. Without that limit a greedy policy can cycle
    /// between cells and never return.
    pub fn train<D>(
        &mut self,
        engine: &mut Engine,
        recorder: &mut dyn AggregateRecorder,
        evaluator: &mut D,
    ) -> Result<usize>
    where
        D: Evaluator<GridEnv, SarsaAgent>,
    {
        info!("Starts training for {} episodes", self.max_episodes);
        let mut max_eval_return = f32::MIN;
        let mut episodes = 0;
        let mut is_flushed = true;

        while episodes < self.max_episodes {
            let summary = match engine.run_one_episode() {
                Some(summary) => summary,
                None => break,
            };
            episodes += 1;
            let mut record = summary.record();

            if is_multiple(episodes, self.eval_interval) {
                let eval_record = evaluator.evaluate(engine.agent_mut())?;
                let eval_return = eval_record.get_scalar("eval_return")?;
                info!(
                    "Evaluation after {} episodes: return {}",
                    episodes, eval_return
                );
                if eval_return > max_eval_return {
                    max_eval_return = eval_return;
                }
                record.merge_inplace(eval_record);
                record.insert("eval_return_best", Scalar(max_eval_return));
            }

            recorder.store(record);
            is_flushed = false;

            if is_multiple(episodes, self.flush_record_interval) {
                recorder.flush(episodes as _);
                is_flushed = true;
            }
        }

        if !is_flushed {
            recorder.flush(episodes as _);
        }
        info!(
            "Finished training after {} episodes, {} steps",
            episodes,
            engine.total_steps()
        );

        Ok(episodes)
    }
}
