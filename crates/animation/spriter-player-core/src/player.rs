//! SpriterPlayer: drives one entity's playback.
//!
//! Call [`SpriterPlayer::update`] once per game-loop tick, then read
//! [`SpriterPlayer::pose`] or hand a [`Drawer`] to [`SpriterPlayer::draw`].
//! The player is single-writer: it owns all mutable playback/transition
//! state and only reads the shared `Entity`/`KeyframePool`.

use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, trace, warn};

use crate::config::{validate_transition, PlayerConfig};
use crate::cursor::PlaybackCursor;
use crate::data::{Animation, BoneTransform, Entity, Keyframe, KeyframePool};
use crate::error::{PlayerError, Result};
use crate::interp::{interpolate, window_ratio};
use crate::modifiers::{BoneOverride, PoseModifiers};
use crate::outputs::{Drawer, Pose};
use crate::transition::{Blend, TransitionInfo, TransitionMachine};

/// Which raw snapshot holds the pose currently on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Shown {
    Real,
    Temp,
}

#[derive(Clone, Debug)]
pub struct SpriterPlayer {
    entity: Arc<Entity>,
    pool: Arc<KeyframePool>,
    cfg: PlayerConfig,

    animation_index: usize,
    cursor: PlaybackCursor,
    machine: TransitionMachine,

    // Raw interpolated poses: steady playback writes `last_frame`,
    // transitions write `last_temp_frame`.
    last_frame: Keyframe,
    last_temp_frame: Keyframe,
    shown: Shown,

    modifiers: PoseModifiers,
    pose: Pose,
    bone_names: HashMap<String, usize>,
}

impl SpriterPlayer {
    /// Player with [`PlayerConfig::default`].
    pub fn new(entity: Arc<Entity>, pool: Arc<KeyframePool>) -> Result<Self> {
        Self::with_config(entity, pool, PlayerConfig::default())
    }

    /// Validates the data and config, then evaluates the first pose at
    /// frame 0 of animation 0.
    pub fn with_config(
        entity: Arc<Entity>,
        pool: Arc<KeyframePool>,
        cfg: PlayerConfig,
    ) -> Result<Self> {
        cfg.validate()?;
        entity.validate()?;
        if entity.is_empty() {
            return Err(PlayerError::InvalidConfiguration {
                reason: format!("entity '{}' has no animations", entity.name),
            });
        }
        pool.validate_against(&entity)?;

        let mut player = Self {
            cursor: PlaybackCursor::new(cfg.frame_speed),
            entity,
            pool,
            cfg,
            animation_index: 0,
            machine: TransitionMachine::Steady,
            last_frame: Keyframe::default(),
            last_temp_frame: Keyframe::default(),
            shown: Shown::Real,
            modifiers: PoseModifiers::default(),
            pose: Pose::default(),
            bone_names: HashMap::new(),
        };
        let pool = Arc::clone(&player.pool);
        player.cursor.rewind(&pool.animations[0]);
        player.sample_steady(&pool.animations[0]);
        player.pose.rebuild(&player.last_frame, &player.modifiers, 0.0, 0.0);
        player.rebuild_bone_names();
        Ok(player)
    }

    /// Advance one tick and recompute the pose, placed at the given offset.
    pub fn update(&mut self, x_offset: f32, y_offset: f32) {
        let pool = Arc::clone(&self.pool);
        let keys = &pool.animations[self.animation_index];
        let mode = self.cfg.angle_mode;

        match self.machine.blend_mut() {
            None => {
                if let Some(key) = self.cursor.advance(keys) {
                    trace!(
                        "animation {} crossed into key {key} at frame {}",
                        self.animation_index,
                        self.cursor.frame
                    );
                }
                self.sample_steady(keys);
            }
            Some(blend) => {
                let step = blend.step(&mut self.cursor.frame);
                interpolate(
                    &blend.incoming,
                    &blend.outgoing,
                    step.ratio,
                    mode,
                    &mut self.last_temp_frame,
                );
                self.shown = Shown::Temp;
                if step.done {
                    self.cursor.rewind(keys);
                    self.machine.finish();
                    debug!(
                        "transition into animation {} complete",
                        self.animation_index
                    );
                }
            }
        }

        let raw = match self.shown {
            Shown::Real => &self.last_frame,
            Shown::Temp => &self.last_temp_frame,
        };
        self.pose.rebuild(raw, &self.modifiers, x_offset, y_offset);
    }

    fn sample_steady(&mut self, keys: &[Keyframe]) {
        let bracket = self.cursor.bracket(keys.len());
        let first = &keys[bracket.first];
        let second = &keys[bracket.second];
        let t = window_ratio(self.cursor.frame, first.start_time, first.end_time);
        interpolate(first, second, t, self.cfg.angle_mode, &mut self.last_frame);
        self.shown = Shown::Real;
    }

    /// Switch to `index`, blending over `steps` counter units at `speed` per
    /// update. Switching to the playing animation is a no-op. Rejected calls
    /// leave the player untouched.
    pub fn set_animation_index(&mut self, index: usize, speed: u32, steps: u32) -> Result<()> {
        validate_transition(speed, steps)?;
        if index >= self.entity.len() {
            return Err(PlayerError::AnimationNotFound { index });
        }
        if index == self.animation_index {
            return Ok(());
        }

        let outgoing = self.raw_pose().clone();
        let incoming = self.pool.animations[index][0].clone();
        let blend = Blend::begin(outgoing, incoming, self.cursor.frame, speed, steps);
        self.machine.begin(blend);
        debug!(
            "switch {} -> {index} ({}, speed {speed}, steps {steps})",
            self.animation_index,
            self.machine.phase().name()
        );

        self.cursor.current_key = 0;
        self.animation_index = index;
        self.rebuild_bone_names();
        Ok(())
    }

    /// [`Self::set_animation_index`] with the configured transition defaults.
    pub fn set_animation(&mut self, index: usize) -> Result<()> {
        self.set_animation_index(index, self.cfg.transition_speed, self.cfg.transition_steps)
    }

    pub fn animation_index_by_name(&self, name: &str) -> Option<usize> {
        self.entity.animation_by_name(name).map(|a| a.id)
    }

    pub fn animation_by_name(&self, name: &str) -> Option<&Animation> {
        self.entity.animation_by_name(name)
    }

    #[inline]
    pub fn animation_index(&self) -> usize {
        self.animation_index
    }

    pub fn animation(&self) -> &Animation {
        &self.entity.animations[self.animation_index]
    }

    #[inline]
    pub fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    /// Replace the entity. It must still match the keyframe pool.
    pub fn set_entity(&mut self, entity: Arc<Entity>) -> Result<()> {
        entity.validate()?;
        self.pool.validate_against(&entity)?;
        self.entity = entity;
        Ok(())
    }

    /// Keyframes of the current animation.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.pool.animations[self.animation_index]
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.cfg
    }

    #[inline]
    pub fn frame(&self) -> i64 {
        self.cursor.frame
    }

    #[inline]
    pub fn current_key(&self) -> usize {
        self.cursor.current_key
    }

    #[inline]
    pub fn frame_speed(&self) -> i32 {
        self.cursor.frame_speed()
    }

    /// Must not exceed one keyframe interval in magnitude.
    pub fn set_frame_speed(&mut self, speed: i32) {
        let len = self.keyframes().len();
        self.cursor.set_frame_speed(speed, len);
    }

    /// Snapshot of the in-flight blend; all zero when steady.
    pub fn transition(&self) -> TransitionInfo {
        let blend = self.machine.blend();
        TransitionInfo {
            phase: self.machine.phase(),
            counter: blend.map_or(0, Blend::counter),
            max_steps: blend.map_or(0, Blend::max_steps),
            speed: blend.map_or(0, Blend::speed),
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.machine.phase().is_transitioning()
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn objects_to_draw(&self) -> usize {
        self.pose.objects_to_draw
    }

    /// Interpolated pose before modifiers and offset.
    pub fn raw_pose(&self) -> &Keyframe {
        match self.shown {
            Shown::Real => &self.last_frame,
            Shown::Temp => &self.last_temp_frame,
        }
    }

    /// Last pose produced by steady playback.
    #[inline]
    pub fn last_frame(&self) -> &Keyframe {
        &self.last_frame
    }

    pub fn draw(&self, drawer: &mut dyn Drawer) {
        self.pose.draw(drawer);
    }

    fn rebuild_bone_names(&mut self) {
        self.bone_names.clear();
        if let Some(first) = self.pool.animations[self.animation_index].first() {
            for (i, bone) in first.bones.iter().enumerate() {
                self.bone_names.entry(bone.name.clone()).or_insert(i);
            }
        }
    }

    pub fn bone_index_by_name(&self, name: &str) -> Option<usize> {
        self.bone_names.get(name).copied()
    }

    pub fn bone(&self, index: usize) -> Option<&BoneTransform> {
        self.pose.bone(index)
    }

    pub fn bone_by_name(&self, name: &str) -> Option<&BoneTransform> {
        self.bone_index_by_name(name).and_then(|i| self.pose.bone(i))
    }

    #[inline]
    pub fn modifiers(&self) -> &PoseModifiers {
        &self.modifiers
    }

    /// Global rotation in degrees, applied from the next update.
    pub fn set_angle(&mut self, angle: f32) {
        self.modifiers.angle = angle;
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.modifiers.angle
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.modifiers.scale = scale;
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.modifiers.scale
    }

    pub fn flip_x(&mut self) {
        self.modifiers.flip_x = !self.modifiers.flip_x;
    }

    pub fn flip_y(&mut self) {
        self.modifiers.flip_y = !self.modifiers.flip_y;
    }

    #[inline]
    pub fn is_flipped_x(&self) -> bool {
        self.modifiers.flip_x
    }

    #[inline]
    pub fn is_flipped_y(&self) -> bool {
        self.modifiers.flip_y
    }

    fn check_bone(&self, index: usize) -> Result<()> {
        if index < self.raw_pose().bones.len() {
            Ok(())
        } else {
            let err = PlayerError::BoneNotFound { index };
            warn!(
                "[{}] bone index {index} out of range for animation '{}'",
                err.category(),
                self.animation().name
            );
            Err(err)
        }
    }

    /// Degrees added to bone `index` on top of the interpolated angle.
    pub fn set_bone_angle(&mut self, index: usize, angle: f32) -> Result<()> {
        self.check_bone(index)?;
        self.modifiers.bone_mut(index).angle = angle;
        Ok(())
    }

    pub fn set_bone_scale_x(&mut self, index: usize, scale: f32) -> Result<()> {
        self.check_bone(index)?;
        self.modifiers.bone_mut(index).scale_x = scale;
        Ok(())
    }

    pub fn set_bone_scale_y(&mut self, index: usize, scale: f32) -> Result<()> {
        self.check_bone(index)?;
        self.modifiers.bone_mut(index).scale_y = scale;
        Ok(())
    }

    pub fn bone_override(&self, index: usize) -> Result<BoneOverride> {
        self.check_bone(index)?;
        Ok(self.modifiers.bone(index))
    }

    /// Drop every global and per-bone modifier.
    pub fn reset_modifiers(&mut self) {
        self.modifiers = PoseModifiers::default();
    }
}
