use libadwaita::prelude::*;
use libadwaita::{Application, ApplicationWindow, HeaderBar, StyleManager, Toast, ToastOverlay};
use gtk4::{Button, CssProvider, Entry, Label, Orientation, ScrolledWindow};
use gtk4::Box as GtkBox;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};

use crate::habit::{self, HabitStore};
use crate::presenter::HabitListPresenter;
use crate::theme::Theme;

pub struct HabitApp {
    window: ApplicationWindow,
    presenter: HabitListPresenter,
    store: Rc<RefCell<HabitStore>>,
    theme: Rc<Cell<Theme>>,
    style_manager: StyleManager,
    toast_overlay: ToastOverlay,
    title_label: Label,
    welcome_label: Label,
    name_entry: Entry,
    progress_entry: Entry,
}

impl HabitApp {
    pub fn new(app: &Application, initial_theme: Theme) -> Rc<Self> {
        let window = ApplicationWindow::builder()
            .application(app)
            .title("Habit Tracker")
            .default_width(600)
            .default_height(700)
            .build();

        let header_bar = HeaderBar::new();
        header_bar.set_title_widget(Some(&Label::new(Some("Habit Tracker"))));

        let css_provider = CssProvider::new();
        css_provider.load_from_data(include_str!("style.css"));
        gtk4::style_context_add_provider_for_display(
            &gtk4::prelude::WidgetExt::display(&window),
            &css_provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        let store = Rc::new(RefCell::new(HabitStore::new()));
        let theme = Rc::new(Cell::new(initial_theme));
        let toast_overlay = ToastOverlay::new();
        let presenter = HabitListPresenter::new(store.clone(), theme.clone(), toast_overlay.clone());

        let content_box = GtkBox::new(Orientation::Vertical, 0);
        content_box.append(&header_bar);

        let main_box = GtkBox::new(Orientation::Vertical, 15);
        main_box.set_margin_top(20);
        main_box.set_margin_bottom(20);
        main_box.set_margin_start(20);
        main_box.set_margin_end(20);

        let title_label = Label::new(Some("Habit Tracker App"));
        title_label.add_css_class("app-title");

        let scrolled_window = ScrolledWindow::new();
        scrolled_window.set_vexpand(true);
        scrolled_window.set_child(Some(presenter.widget()));

        let name_entry = Entry::new();
        name_entry.set_placeholder_text(Some("Add a new habit"));

        let progress_entry = Entry::new();
        progress_entry.set_placeholder_text(Some("Enter your progress"));

        let add_button = Button::with_label("Add Habit");
        add_button.add_css_class("suggested-action");

        let welcome_label = Label::new(Some("Welcome to your Habit Tracker!"));
        welcome_label.add_css_class("welcome-message");

        let theme_button = Button::with_label("Toggle Dark Mode");

        main_box.append(&title_label);
        main_box.append(&scrolled_window);
        main_box.append(&name_entry);
        main_box.append(&progress_entry);
        main_box.append(&add_button);
        main_box.append(&welcome_label);
        main_box.append(&theme_button);

        content_box.append(&main_box);
        toast_overlay.set_child(Some(&content_box));
        window.set_content(Some(&toast_overlay));

        let app = Rc::new(Self {
            window,
            presenter,
            store,
            theme,
            style_manager: StyleManager::default(),
            toast_overlay,
            title_label,
            welcome_label,
            name_entry,
            progress_entry,
        });

        app.apply_theme();
        Self::setup_events(&app, &add_button, &theme_button);
        app.presenter.render();
        app
    }

    fn setup_events(app: &Rc<Self>, add_button: &Button, theme_button: &Button) {
        let progress_entry = app.progress_entry.clone();
        app.name_entry.connect_activate(move |_| {
            progress_entry.grab_focus();
        });

        let add_button_clone = add_button.clone();
        app.progress_entry.connect_activate(move |_| {
            add_button_clone.emit_clicked();
        });

        // The window owns these handlers, so they keep the app alive with it.
        let app_add = app.clone();
        add_button.connect_clicked(move |_| {
            app_add.add_habit();
        });

        let app_theme = app.clone();
        theme_button.connect_clicked(move |_| {
            app_theme.toggle_theme();
        });
    }

    fn add_habit(&self) {
        let name = self.name_entry.text();
        let progress = self.progress_entry.text();

        let added = self
            .store
            .borrow_mut()
            .add(&name, &progress, habit::today())
            .map(|habit| habit.name.clone());

        match added {
            Ok(habit_name) => {
                self.name_entry.set_text("");
                self.progress_entry.set_text("");
                self.presenter.render();

                let toast = Toast::new(&format!("Added habit: {}", habit_name));
                self.toast_overlay.add_toast(toast);
            }
            Err(e) => {
                debug!(error = %e, "ignoring add request");
            }
        }
    }

    fn toggle_theme(&self) {
        self.theme.set(self.theme.get().toggled());
        info!(theme = ?self.theme.get(), "theme switched");
        self.apply_theme();
        self.presenter.render();
    }

    fn apply_theme(&self) {
        let theme = self.theme.get();
        self.style_manager.set_color_scheme(theme.color_scheme());

        for label in [&self.title_label, &self.welcome_label] {
            label.remove_css_class(theme.other_css_class());
            label.add_css_class(theme.css_class());
        }
    }

    pub fn show(&self) {
        self.window.present();
    }
}
