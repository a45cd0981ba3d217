mod api;
mod config;
mod input;
mod log;
mod surface;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use api::SessionClient;
use config::Config;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use surface::logic::Effect;
use surface::{save, PopSurface};

const POP_SOUND: &str = "./sound/PopSound.mp3";

struct App {
    surface: RefCell<PopSurface>,
    click_state: Rc<RefCell<ClickState>>,
    client: SessionClient,
    storage_key: String,
}

/// Convert client pixel coordinates to a terminal cell via the grid container's rect.
fn dom_pixel_to_cell(x: f64, y: f64, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;

    // DomBackend renders its grid as a <div> directly inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(x - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(y - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Control under the pointer. `Err(())` when the press missed the grid entirely.
fn target_at(app: &App, x: f64, y: f64) -> Result<Option<u16>, ()> {
    let cs = app.click_state.borrow();
    if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
        return Err(());
    }
    let (col, row) = dom_pixel_to_cell(x, y, &cs).ok_or(())?;
    Ok(cs.hit_test(col, row))
}

fn play_pop_sound() {
    let audio = match web_sys::HtmlAudioElement::new_with_src(POP_SOUND) {
        Ok(a) => a,
        Err(e) => {
            log::warn(&format!("audio unavailable: {e:?}"));
            return;
        }
    };
    match audio.play() {
        Ok(promise) => spawn_local(async move {
            // Autoplay policies reject until the first user gesture.
            if let Err(e) = JsFuture::from(promise).await {
                log::warn(&format!("pop sound blocked: {e:?}"));
            }
        }),
        Err(e) => log::warn(&format!("pop sound failed: {e:?}")),
    }
}

fn dispatch(app: &Rc<App>, event: InputEvent) {
    let effects = app
        .surface
        .borrow_mut()
        .handle_input(&event, time::now_ms());
    run_effects(app, effects);
}

/// Carry out the side effects of a transition. Network results re-enter the
/// surface from their own task once the response arrives.
fn run_effects(app: &Rc<App>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::PlayPopSound => play_pop_sound(),
            Effect::PersistCount(count) => save::save_count(&app.storage_key, count),
            Effect::ReportClick(token) => {
                let app = app.clone();
                spawn_local(async move {
                    // The local count stays as is.
                    if let Err(e) = app.client.report_click(&token).await {
                        log::warn(&e.to_string());
                    }
                });
            }
            Effect::FetchLeaderboard => {
                let app = app.clone();
                spawn_local(async move {
                    match app.client.fetch_leaderboard().await {
                        Ok(entries) => app.surface.borrow_mut().leaderboard_loaded(entries),
                        Err(e) => app.surface.borrow().leaderboard_failed(&e),
                    }
                });
            }
            Effect::Login(username) => {
                let app = app.clone();
                spawn_local(async move {
                    let effects = match app.client.authenticate(&username).await {
                        Ok(resp) => {
                            log::info(&format!("logged in as {username}"));
                            app.surface
                                .borrow_mut()
                                .login_succeeded(username, resp.token, resp.clicked)
                        }
                        Err(e) => {
                            log::error(&e.to_string());
                            app.surface.borrow_mut().login_failed();
                            Vec::new()
                        }
                    };
                    run_effects(&app, effects);
                });
            }
            Effect::Logout => {
                let app = app.clone();
                spawn_local(async move {
                    let effects = match app.client.deauthenticate().await {
                        Ok(()) => {
                            log::info("logged out");
                            app.surface.borrow_mut().logout_succeeded()
                        }
                        Err(e) => {
                            log::error(&e.to_string());
                            app.surface.borrow_mut().logout_failed();
                            Vec::new()
                        }
                    };
                    run_effects(&app, effects);
                });
            }
        }
    }
}

fn touch_point(e: &web_sys::TouchEvent) -> Option<(f64, f64)> {
    let touch = e.changed_touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// Touch, wheel and page lifecycle listeners. ratzilla only forwards mouse
/// buttons and keys.
fn install_window_listeners(app: &Rc<App>) -> Option<()> {
    let window = web_sys::window()?;

    let touch_start = Closure::wrap(Box::new({
        let app = app.clone();
        move |e: web_sys::TouchEvent| {
            // Before the hit test, so a touch that misses the grid still
            // silences the synthetic mousedown that follows it.
            app.surface.borrow_mut().note_touch();
            let Some((x, y)) = touch_point(&e) else {
                return;
            };
            if let Ok(target) = target_at(&app, x, y) {
                dispatch(&app, InputEvent::TouchStart(target));
            }
        }
    }) as Box<dyn FnMut(web_sys::TouchEvent)>);
    window
        .add_event_listener_with_callback("touchstart", touch_start.as_ref().unchecked_ref())
        .ok()?;
    touch_start.forget();

    let touch_end = Closure::wrap(Box::new({
        let app = app.clone();
        move || dispatch(&app, InputEvent::TouchEnd)
    }) as Box<dyn FnMut()>);
    for kind in ["touchend", "touchcancel"] {
        window
            .add_event_listener_with_callback(kind, touch_end.as_ref().unchecked_ref())
            .ok()?;
    }
    touch_end.forget();

    let wheel = Closure::wrap(Box::new({
        let app = app.clone();
        move |e: web_sys::WheelEvent| {
            let rows = match e.delta_y() {
                d if d < 0.0 => -1,
                d if d > 0.0 => 1,
                _ => return,
            };
            dispatch(&app, InputEvent::Scroll(rows));
        }
    }) as Box<dyn FnMut(web_sys::WheelEvent)>);
    window
        .add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())
        .ok()?;
    wheel.forget();

    let page_hide = Closure::wrap(Box::new({
        let app = app.clone();
        move || app.surface.borrow_mut().teardown()
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("pagehide", page_hide.as_ref().unchecked_ref())
        .ok()?;
    page_hide.forget();

    Some(())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let mut config = Config::from_build_env();
    if let Some(search) = web_sys::window().and_then(|w| w.location().search().ok()) {
        config.apply_query(&search);
    }
    log::info(&format!(
        "backend={} app={} features={:?}",
        config.backend_url, config.app_id, config.feature_set
    ));

    let mut surface = PopSurface::new(&config);
    let storage_key = config.storage_key();
    surface.restore(save::load_count(&storage_key));

    let app = Rc::new(App {
        surface: RefCell::new(surface),
        click_state: Rc::new(RefCell::new(ClickState::new())),
        client: SessionClient::new(config.backend_url.clone()),
        storage_key,
    });

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let app = app.clone();
        move |mouse_event| match mouse_event.event {
            MouseEventKind::Pressed if mouse_event.button == MouseButton::Left => {
                if let Ok(target) = target_at(&app, mouse_event.x as f64, mouse_event.y as f64) {
                    dispatch(&app, InputEvent::PointerDown(target));
                }
            }
            MouseEventKind::Released => dispatch(&app, InputEvent::PointerUp),
            _ => {}
        }
    });

    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Enter => InputEvent::Enter,
                KeyCode::Esc => InputEvent::Escape,
                KeyCode::Up => InputEvent::Scroll(-1),
                KeyCode::Down => InputEvent::Scroll(1),
                _ => return,
            };
            dispatch(&app, event);
        }
    });

    if install_window_listeners(&app).is_none() {
        log::warn("touch listeners not installed");
    }

    terminal.draw_web({
        let app = app.clone();
        move |f| {
            let effects = app.surface.borrow_mut().tick(time::now_ms());
            run_effects(&app, effects);

            let size = f.area();
            app.surface.borrow_mut().resize(size.height);
            {
                let mut cs = app.click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            app.surface.borrow().render(f, size, &app.click_state);
        }
    });

    Ok(())
}
