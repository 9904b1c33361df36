//! Calc Pong entry point
//!
//! Web: hooks the Meta+1 shortcut and mounts the game on a canvas.
//! Native: plays a headless demo match against the AI in the terminal.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use calc_pong::consts::TICK_INTERVAL_MS;
    use calc_pong::input::{InputEvent, SecretCombo};
    use calc_pong::renderer::{CanvasRenderer, Renderer};
    use calc_pong::{Session, Settings, TickOutcome};

    /// Element id of the game canvas
    const CANVAS_ID: &str = "pong-canvas";

    type KeyHandler = Closure<dyn FnMut(KeyboardEvent)>;

    /// A game currently on screen. Dropping it frees the JS callbacks.
    struct Mounted {
        session: Session,
        renderer: Option<CanvasRenderer>,
        canvas: HtmlCanvasElement,
        interval: i32,
        on_tick: Closure<dyn FnMut()>,
        keydown: KeyHandler,
        keyup: KeyHandler,
    }

    struct App {
        settings: Settings,
        combo: SecretCombo,
        game: Option<Mounted>,
    }

    impl App {
        fn tick(&mut self) -> TickOutcome {
            match self.game.as_mut() {
                Some(game) => {
                    let surface = game.renderer.as_mut().map(|r| r as &mut dyn Renderer);
                    game.session.run_tick(surface)
                }
                None => TickOutcome::Closed,
            }
        }

        fn push(&mut self, event: InputEvent) {
            if let Some(game) = self.game.as_mut() {
                game.session.push(event);
            }
        }

        /// Stop ticking and detach the game's key listeners
        fn unmount(&mut self) {
            let Some(mut game) = self.game.take() else {
                return;
            };
            game.session.close();

            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(game.interval);
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    game.keydown.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "keyup",
                    game.keyup.as_ref().unchecked_ref(),
                );
            }
            let _ = game.canvas.set_attribute("hidden", "");
            // Safe even from inside on_tick: wasm-bindgen defers the free
            // until the running callback returns
            drop(game.on_tick);
            log::info!("Pong closed");
        }
    }

    fn canvas() -> Result<HtmlCanvasElement, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("game canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("game element is not a canvas"))
    }

    fn mount(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let canvas = canvas()?;

        let (seed, show_center_line) = {
            let a = app.borrow();
            let seed = a.settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            (seed, a.settings.show_center_line)
        };
        let renderer = CanvasRenderer::new(&canvas, show_center_line);
        if renderer.is_none() {
            log::warn!("No 2D context, ticks will be skipped");
        }
        canvas.remove_attribute("hidden")?;

        // Game input
        let keydown = {
            let app = app.clone();
            let closure = KeyHandler::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut a = app.borrow_mut();
                if let Some(ev) = a.settings.keys.translate(&event.key(), true) {
                    if matches!(ev, InputEvent::PaddleUp(_) | InputEvent::PaddleDown(_)) {
                        event.prevent_default();
                    }
                    a.push(ev);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure
        };
        let keyup = {
            let app = app.clone();
            let closure = KeyHandler::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if let Some(ev) = a.settings.keys.translate(&event.key(), false) {
                    a.push(ev);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure
        };

        // Tick loop
        let on_tick = {
            let app = app.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut a = app.borrow_mut();
                if a.tick() == TickOutcome::Closed {
                    a.unmount();
                }
            })
        };
        let interval = window.set_interval_with_callback_and_timeout_and_arguments_0(
            on_tick.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS.round() as i32,
        )?;

        app.borrow_mut().game = Some(Mounted {
            session: Session::new(seed),
            renderer,
            canvas,
            interval,
            on_tick,
            keydown,
            keyup,
        });
        log::info!("Pong mounted");
        Ok(())
    }

    fn toggle(app: &Rc<RefCell<App>>) {
        let showing = app.borrow().game.is_some();
        if showing {
            app.borrow_mut().unmount();
        } else if let Err(e) = mount(app) {
            log::error!("Failed to start Pong: {:?}", e);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let app = Rc::new(RefCell::new(App {
            settings: Settings::load(),
            combo: SecretCombo::new(),
            game: None,
        }));

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };

        // Meta+1 shows and hides the game
        {
            let app_down = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let fire = app_down.borrow_mut().combo.on_key(&event.key(), true);
                if fire {
                    event.prevent_default();
                    toggle(&app_down);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app_up = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app_up.borrow_mut().combo.on_key(&event.key(), false);
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Calc Pong ready (Meta+1)");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use calc_pong::clock::IntervalClock;
    use calc_pong::input::InputEvent;
    use calc_pong::renderer::TextRenderer;
    use calc_pong::sim::GamePhase;
    use calc_pong::{Session, Settings, TickOutcome};

    env_logger::init();
    log::info!("Calc Pong (native) starting...");

    let mut ticks: u64 = 600;
    let mut realtime = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            other => match other.parse() {
                Ok(n) => ticks = n,
                Err(_) => log::warn!("Ignoring argument {:?}", other),
            },
        }
    }

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let mut session = Session::new(seed);
    let mut renderer = TextRenderer::default().with_center_line(settings.show_center_line);
    let mut clock = IntervalClock::standard();
    let mut held: Option<InputEvent> = None;

    for _ in 0..ticks {
        let state = session.state();
        if state.phase == GamePhase::NotStarted {
            session.push(InputEvent::StartOrResume);
        } else {
            // Scripted player: follow the ball with the arrow keys
            let diff = state.ball.pos.y - state.player.center_y();
            let want = if diff < -8.0 {
                Some(InputEvent::PaddleUp(true))
            } else if diff > 8.0 {
                Some(InputEvent::PaddleDown(true))
            } else {
                None
            };
            if want != held {
                match held {
                    Some(InputEvent::PaddleUp(_)) => session.push(InputEvent::PaddleUp(false)),
                    Some(InputEvent::PaddleDown(_)) => session.push(InputEvent::PaddleDown(false)),
                    _ => {}
                }
                if let Some(press) = want {
                    session.push(press);
                }
                held = want;
            }
        }

        if realtime {
            clock.wait();
        }
        if session.run_tick(Some(&mut renderer)) == TickOutcome::Closed {
            break;
        }
        if realtime {
            println!("\x1b[H\x1b[2J{}", renderer.last_frame());
        }
    }

    session.push(InputEvent::Close);
    session.run_tick(Some(&mut renderer));

    println!("{}", renderer.last_frame());
    match serde_json::to_string(&session.snapshot()) {
        Ok(json) => log::info!("Final frame: {}", json),
        Err(e) => log::warn!("Can't serialize final frame: {}", e),
    }
    if clock.overruns() > 0 {
        log::info!("{} ticks overran", clock.overruns());
    }
}
