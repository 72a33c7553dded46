//=========================================================================
// Cat Shooter
//=========================================================================
//
// Two-scene demo: a main menu and a world with a walking cat.
//
//   Enter  start (menu)
//   WASD   move
//   Space  shoot (0.5s cooldown)
//   Q      back to menu
//   F11    toggle fullscreen
//
// All assets are generated at startup. Run with `--headless` to drive a
// few hundred frames without opening a window.
//
//=========================================================================

use std::f32::consts::TAU;
use std::io::Cursor;

use log::info;
use pina::prelude::*;

const TITLE_SIZE: f32 = 25.0;
const PLAYER_SPEED: f32 = 100.0;
const SHOT_COOLDOWN: f32 = 0.5;
const SAMPLE_RATE: u32 = 22_050;

//=== Generated Assets ====================================================

/// Mono 16-bit WAV of a sine tone.
fn tone_wav(frequency: f32, seconds: f32, amplitude: f32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    let frames = (SAMPLE_RATE as f32 * seconds) as u32;
    for i in 0..frames {
        let t = i as f32 / SAMPLE_RATE as f32;
        let sample = (t * frequency * TAU).sin() * amplitude;
        writer.write_sample((sample * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

/// Short decaying blip.
fn shot_samples() -> Vec<f32> {
    let frames = SAMPLE_RATE / 10;
    (0..frames)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let decay = 1.0 - i as f32 / frames as f32;
            (t * 880.0 * TAU).sin() * decay * 0.4
        })
        .collect()
}

/// 2×2 sheet of 32×32 cat frames.
fn cat_sheet() -> Image {
    Image::gen_checked(64, 64, 8, 8, Color::ORANGE, Color::new(127, 106, 79, 255))
}

//=== MainMenu ============================================================

#[derive(Default)]
struct MainMenu {
    resources: ResourceManager,
}

impl Scene for MainMenu {
    fn load(&mut self, ctx: &mut Context) -> SceneResult {
        let backdrop = Image::gen_checked(16, 16, 8, 8, Color::DARKGRAY, Color::BLACK);
        self.resources
            .init::<Texture>("backdrop")?
            .load_from_image(&backdrop, ctx)?
            .set_wrap(TextureWrap::Repeat, ctx)?;
        Ok(())
    }

    fn get_input(&mut self, ctx: &mut Context) -> SceneResult {
        if ctx.input.is_key_pressed(KeyCode::Enter) {
            ctx.scenes.change("World");
        }
        if ctx.input.is_key_pressed(KeyCode::F11) {
            ctx.window.toggle_fullscreen();
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut Context) -> SceneResult {
        let backdrop = self.resources.get::<Texture>("backdrop")?;
        let screen = ctx.window.size().as_vec2();

        ctx.graphics.clear_background(Color::BLANK);
        if let Some(id) = backdrop.id() {
            let source = Rect::new(0.0, 0.0, screen.x, screen.y);
            ctx.graphics.draw_texture_rec(id, source, Vec2::ZERO, Color::WHITE);
        }

        let text = "Press Enter To Play";
        let size = ctx.graphics.measure_text(text, TITLE_SIZE);
        let position = screen / 2.0 - size / 2.0;
        ctx.graphics.draw_text(text, position, TITLE_SIZE, Color::WHITE);
        Ok(())
    }

    fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }
}

//=== World ===============================================================

struct World {
    resources: ResourceManager,
    player: Option<Sprite>,
    walk: Option<SpriteAnimatorController>,
    shot_timer: Timer,
    shots: u32,
}

impl World {
    fn new() -> Self {
        Self {
            resources: ResourceManager::new(),
            player: None,
            walk: None,
            shot_timer: Timer::new(SHOT_COOLDOWN, false),
            shots: 0,
        }
    }

    fn direction(ctx: &Context) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if ctx.input.is_key_down(KeyCode::KeyD) {
            direction.x = 1.0;
        }
        if ctx.input.is_key_down(KeyCode::KeyA) {
            direction.x = -1.0;
        }
        if ctx.input.is_key_down(KeyCode::KeyW) {
            direction.y = -1.0;
        }
        if ctx.input.is_key_down(KeyCode::KeyS) {
            direction.y = 1.0;
        }
        direction
    }
}

impl Scene for World {
    fn load(&mut self, ctx: &mut Context) -> SceneResult {
        self.resources
            .init::<Texture>("cat")?
            .load_from_image(&cat_sheet(), ctx)?
            .set_filter(TextureFilter::Point, ctx)?;

        let theme = tone_wav(220.0, 2.0, 0.2).map_err(|e| ResourceError::Decode(e.to_string()))?;
        self.resources
            .insert("theme", Music::load_stream_from_memory(&theme, ctx)?)?;

        self.resources
            .insert("shot", Sound::from_samples(shot_samples(), 1, SAMPLE_RATE, ctx)?)?;
        Ok(())
    }

    fn init(&mut self, ctx: &mut Context) -> SceneResult {
        let center = ctx.window.size().as_vec2() / 2.0;
        let cat = self.resources.get::<Texture>("cat")?;
        self.player = Some(Sprite::new(cat, 2, 2)?.with_position(center));
        self.walk = Some(
            SpriteAnimatorController::new("idle", SpriteAnimator::new(vec![0], 1.0))
                .with_animation("walk", SpriteAnimator::new(vec![0, 1, 2, 3], 8.0)),
        );
        self.shots = 0;
        self.shot_timer.start();

        self.resources.get::<Music>("theme")?.play_stream(ctx)?;
        info!("World ready, cat at {}", center);
        Ok(())
    }

    fn get_input(&mut self, ctx: &mut Context) -> SceneResult {
        if ctx.input.is_key_pressed(KeyCode::KeyQ) {
            ctx.scenes.change("MainMenu");
        }
        if ctx.input.is_key_pressed(KeyCode::Space) && !self.shot_timer.is_running() {
            self.resources.get::<Sound>("shot")?.play(ctx)?;
            self.shots += 1;
            self.shot_timer.start();
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context, delta: f32) -> SceneResult {
        self.shot_timer.step(delta);

        let direction = Self::direction(ctx);
        if let (Some(player), Some(walk)) = (self.player.as_mut(), self.walk.as_mut()) {
            player.position += direction * PLAYER_SPEED * delta;
            walk.play(if direction == Vec2::ZERO { "idle" } else { "walk" });
            walk.update(delta, player);
        }

        self.resources.get::<Music>("theme")?.update_stream(ctx)?;
        Ok(())
    }

    fn draw(&self, ctx: &mut Context) -> SceneResult {
        ctx.graphics.clear_background(Color::BLACK);
        if let Some(player) = &self.player {
            player.draw(ctx)?;
        }

        let hud = format!("Shots: {}  FPS: {:.0}", self.shots, ctx.time.fps());
        ctx.graphics
            .draw_text(&hud, Vec2::new(10.0, 10.0), 20.0, Color::RAYWHITE);
        Ok(())
    }

    fn unload(&mut self, _ctx: &mut Context) {
        self.player = None;
        self.walk = None;
        self.shot_timer.stop();
    }

    fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }
}

//=== Entry Point =========================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = WindowConfig::new("Cat Shooter", IVec2::new(960, 540))
        .with_resizable(true)
        .with_icon(Image::gen_checked(32, 32, 16, 16, Color::YELLOW, Color::GREEN));

    let mut scenes = SceneManager::new("MainMenu", MainMenu::default());
    scenes.add_scene("World", World::new())?;

    let app = ApplicationBuilder::new(config)
        .with_target_fps(Some(60))
        .build(scenes);

    if std::env::args().any(|arg| arg == "--headless") {
        app.run_headless(300, 1.0 / 60.0)?;
    } else {
        app.run()?;
    }
    Ok(())
}
