//! Dino Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlImageElement, HtmlVideoElement, KeyboardEvent, TouchEvent};

    use dino_dash::Session;
    use dino_dash::assets::{Asset, AssetGate};
    use dino_dash::highscores::LocalStorageStore;
    use dino_dash::input::InputSignal;
    use dino_dash::platform::web::{BrowserPrompt, fetch_citations, load_tuning};
    use dino_dash::renderer::CanvasRenderer;

    const CITATIONS_URL: &str = "citations.json";

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: CanvasRenderer,
        /// Citation currently written into the DOM box
        shown_citation: Option<String>,
    }

    impl Game {
        /// Mirror the game-over citation into the citation box
        fn update_citation_box(&mut self) {
            let quote = self.session.citation().map(|c| c.quote.clone());
            if quote == self.shown_citation {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("citation-box") {
                match self.session.citation() {
                    Some(citation) => {
                        el.set_text_content(Some(&citation.quote));
                        let _ = el.set_attribute("data-source", &citation.source);
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        el.set_text_content(None);
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
            self.shown_citation = quote;
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let player_image: Option<HtmlImageElement> = document
            .get_element_by_id("player-img")
            .and_then(|el| el.dyn_into().ok());
        let obstacle_video: Option<HtmlVideoElement> = document
            .get_element_by_id("obstacle-video")
            .and_then(|el| el.dyn_into().ok());

        let tuning = load_tuning();
        canvas.set_width(tuning.canvas_width as u32);
        canvas.set_height(tuning.canvas_height as u32);

        let renderer = CanvasRenderer::new(&canvas, player_image.clone(), obstacle_video.clone())
            .expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            tuning,
            seed,
            Box::new(LocalStorageStore),
            Box::new(BrowserPrompt::default()),
        );
        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            shown_citation: None,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        load_citations(game.clone());

        let gate = Rc::new(RefCell::new(AssetGate::new()));
        watch_player_image(player_image, gate.clone(), game.clone());
        watch_obstacle_video(obstacle_video, gate, game);
    }

    /// Start the loop the moment the gate opens
    fn mark_ready(gate: &Rc<RefCell<AssetGate>>, asset: Asset, game: &Rc<RefCell<Game>>) {
        if gate.borrow_mut().mark_ready(asset) {
            request_animation_frame(game.clone());
            log::info!("Dino Dash running!");
        }
    }

    fn watch_player_image(
        image: Option<HtmlImageElement>,
        gate: Rc<RefCell<AssetGate>>,
        game: Rc<RefCell<Game>>,
    ) {
        let Some(image) = image.filter(|img| !img.complete()) else {
            // Already decoded, or no sprite at all (rectangles are drawn instead)
            mark_ready(&gate, Asset::PlayerImage, &game);
            return;
        };

        // A broken sprite falls back to rectangles rather than blocking the start
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if event.type_() == "error" {
                log::warn!("Player image failed to load");
            }
            mark_ready(&gate, Asset::PlayerImage, &game);
        });
        for kind in ["load", "error"] {
            let _ = image.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn watch_obstacle_video(
        video: Option<HtmlVideoElement>,
        gate: Rc<RefCell<AssetGate>>,
        game: Rc<RefCell<Game>>,
    ) {
        // HAVE_CURRENT_DATA or better means a frame can be drawn
        let Some(video) = video.filter(|v| v.ready_state() < 2) else {
            mark_ready(&gate, Asset::ObstacleVideo, &game);
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if event.type_() == "error" {
                log::warn!("Obstacle video failed to load");
            }
            mark_ready(&gate, Asset::ObstacleVideo, &game);
        });
        for kind in ["canplay", "error"] {
            let _ = video.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        closure.forget();
        let _ = video.play();
    }

    fn load_citations(game: Rc<RefCell<Game>>) {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_citations(CITATIONS_URL).await {
                Ok(list) => game.borrow_mut().session.set_citations(list),
                Err(e) => log::warn!("{}", e),
            }
        });
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        g.session.push_input(InputSignal::Jump);
                    }
                    "Enter" | "KeyR" => g.session.push_input(InputSignal::Reset),
                    "KeyI" => g.session.push_input(InputSignal::ToggleAutopilot),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (jump)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.push_input(InputSignal::Jump);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.push_input(InputSignal::Reset);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            g.session.frame(time, &mut g.renderer);
            g.update_citation_box();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_dash::Session;
    use dino_dash::consts::{TICK_MS, TICKS_PER_SECOND};
    use dino_dash::highscores::MemoryStore;
    use dino_dash::platform::load_tuning;
    use dino_dash::prompt::FixedPrompt;
    use dino_dash::renderer::HeadlessRenderer;

    env_logger::init();
    log::info!("Dino Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let tuning_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let tuning = load_tuning(tuning_path.as_deref());

    let store = MemoryStore::new();
    let mut session = Session::new(
        tuning,
        0xd1_70,
        Box::new(store.clone()),
        Box::new(FixedPrompt::new(Some("Autopilot".into()))),
    );
    session.set_autopilot(true);

    let mut sink = HeadlessRenderer::default();
    let max_frames = 5 * 60 * TICKS_PER_SECOND as u64;
    let mut frame = 0u64;
    while frame < max_frames && session.state().is_running() {
        session.frame(frame as f64 * TICK_MS, &mut sink);
        frame += 1;
    }

    let state = session.state();
    println!(
        "Ran {} frames: tick {}, score {}, speed {:.2}, {:?}",
        sink.frames, state.time_ticks, state.score, state.speed, state.phase
    );
    println!(
        "High score: {} ({}), saved {} time(s)",
        session.high_score().score,
        session.high_score().name,
        store.save_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
