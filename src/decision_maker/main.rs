use crate::config::Config;
use crate::decision_maker::core::{init, transition, Effect, Model, Msg};
use crate::decision_maker::render::render;
use crate::decision_maker::run_effect::RunEffect;
use crate::device_display::interface::DeviceDisplay;
use crate::error::{Error, Result};
use crate::library::logger::interface::Logger;
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct DecisionMaker {
    model: Arc<Mutex<Model>>,
    msg_sender: Sender<Msg>,
    msg_receiver: Arc<Mutex<Receiver<Msg>>>,
    config: Config,
    logger: Arc<dyn Logger>,
    run_effect: RunEffect,
    device_display: Arc<dyn DeviceDisplay>,
}

impl DecisionMaker {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger>,
        run_effect: RunEffect,
        device_display: Arc<dyn DeviceDisplay>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();

        Self {
            model: Arc::new(Mutex::new(Model::default())),
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
            config,
            logger: logger.with_namespace("decision_maker"),
            run_effect,
            device_display,
        }
    }

    pub fn sender(&self) -> Sender<Msg> {
        self.msg_sender.clone()
    }

    #[cfg(test)]
    pub fn model(&self) -> Model {
        self.model
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resets to the initial model, renders it and returns the start-up
    /// effects.
    fn start(&self) -> Result<Vec<Effect>> {
        let (model, effects) = init();
        self.device_display.render(&render(&self.config, &model))?;
        *self.model.lock().unwrap_or_else(PoisonError::into_inner) = model;
        Ok(effects)
    }

    fn handle(&self, msg: Msg) -> Result<Vec<Effect>> {
        let _ = self.logger.info(&format!("msg: {:?}", msg));

        let mut model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        let (new_model, effects) = transition(&self.config, model.clone(), msg);
        *model = new_model;

        let _ = self.logger.info(&format!(
            "phase: {:?}, generation: {}, effects: {:?}",
            model.phase, model.generation, effects
        ));

        self.device_display.render(&render(&self.config, &model))?;

        Ok(effects)
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            let msg_sender = self.msg_sender.clone();
            std::thread::spawn(move || {
                if let Some(msg) = run_effect.run_effect(effect) {
                    let _ = msg_sender.send(msg);
                }
            });
        }
    }

    /// Processes messages until the channel fails. Effects run on their own
    /// threads and report back through the channel.
    pub fn run(&self) -> Result<()> {
        let effects = self.start()?;
        self.spawn_effects(effects);

        loop {
            let msg = self
                .msg_receiver
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .recv()
                .map_err(|e| Error::Stopped(e.to_string()))?;

            let effects = self.handle(msg)?;
            self.spawn_effects(effects);
        }
    }

    /// Starts the component and runs every effect inline until no messages
    /// are left.
    pub fn run_inline(&self) -> Result<()> {
        let effects = self.start()?;
        self.settle(effects)
    }

    /// Handles `msg` and everything it causes on the calling thread.
    pub fn dispatch_inline(&self, msg: Msg) -> Result<()> {
        let effects = self.handle(msg)?;
        self.settle(effects)
    }

    fn settle(&self, effects: Vec<Effect>) -> Result<()> {
        let mut pending: VecDeque<Effect> = effects.into();

        while let Some(effect) = pending.pop_front() {
            if let Some(msg) = self.run_effect.run_effect(effect) {
                pending.extend(self.handle(msg)?);
            }
        }

        Ok(())
    }
}
