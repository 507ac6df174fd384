use std::{error::Error, fs, path::Path};

use qcontrol::{
    algo::{QTableAgent, QTableAgentConfig},
    quantum::Propagator,
    train::{train_with, TrainConfig},
};

const SEED: u64 = 2020;

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/qubit_control");

    let config = TrainConfig::default();
    let mut agent = QTableAgent::seeded(
        config.n_states(),
        config.n_actions(),
        QTableAgentConfig::default(),
        SEED,
    )?;

    let out = path.join("out").join(agent.run_label());
    fs::create_dir_all(&out)?;

    let training = train_with(&mut agent, &config, Propagator::Exact)?;

    let mut wtr = csv::Writer::from_path(out.join("rewards.csv"))?;
    wtr.write_record(["episode", "fidelity"])?;
    for (i, reward) in training.rewards.iter().enumerate() {
        wtr.write_record(&[i.to_string(), reward.to_string()])?;
    }
    wtr.flush()?;

    if let Some((episode, reward)) = training.best() {
        println!("best fidelity {reward:.6} in episode {}", episode + 1);
    }
    if let Some(last) = training.rewards.last() {
        println!("final fidelity {last:.6}");
    }

    Ok(())
}
