//! Acceptance test harness: a stand-in for the cashbook server plus page
//! objects that drive the rendered pages through a simulated browser.

#![allow(dead_code, reason = "not every scenario file uses every helper")]

pub mod fixtures;

use cashbook_core::dom::{Dom, MemoryDom, NodeId};
use cashbook_core::{cashbook_registry, Browser};

use fixtures::Rendered;

pub const TEST_USERNAME: &str = "test_prison_1";
pub const TEST_PASSWORD: &str = "test_prison_1";

/// Which kind of box [`World::box_text`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Dialog,
    Error,
}

impl BoxKind {
    const fn selector(self) -> &'static str {
        match self {
            Self::Dialog => "dialog h3",
            Self::Error => "div.error-summary h1",
        }
    }
}

struct Loaded {
    path: String,
    title: &'static str,
    browser: Browser,
    /// Submissions already handled by the server
    seen_submissions: usize,
}

/// One user session against the site.
pub struct World {
    signed_in: bool,
    loaded: Option<Loaded>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self { signed_in: false, loaded: None }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    /// Requests `path` and mounts the app on the response.
    pub fn visit(&mut self, path: &str) {
        let route = path.split('?').next().unwrap_or(path);
        let rendered = match route {
            "/login/" => fixtures::signin(false, None),
            "/logout/" => {
                self.signed_in = false;
                self.load("/login/", fixtures::signin(false, Some("You are now signed out")));
                return;
            },
            _ if !self.signed_in => {
                self.load("/login/", fixtures::signin(false, None));
                return;
            },
            "/" => fixtures::dashboard(),
            "/batch" => fixtures::new_credits(),
            "/locked" => fixtures::locked(),
            "/history" => fixtures::history(),
            "/disbursements/" => fixtures::disbursements(),
            other => panic!("no page is served at {other}"),
        };
        self.load(route, rendered);
    }

    fn load(&mut self, path: &str, rendered: Rendered) {
        let Rendered { title, body } = rendered;
        let mut browser = Browser::new(MemoryDom::from_children(body));
        browser.mount(cashbook_registry());
        self.loaded =
            Some(Loaded { path: path.to_string(), title, browser, seen_submissions: 0 });
    }

    fn loaded(&self) -> &Loaded {
        self.loaded.as_ref().expect("no page has been loaded")
    }

    pub fn browser(&mut self) -> &mut Browser {
        &mut self.loaded.as_mut().expect("no page has been loaded").browser
    }

    pub fn browser_ref(&self) -> &Browser {
        &self.loaded().browser
    }

    pub fn path(&self) -> &str {
        &self.loaded().path
    }

    pub fn title(&self) -> &str {
        self.loaded().title
    }

    pub fn find(&self, selector: &str) -> NodeId {
        self.browser_ref()
            .find(selector)
            .unwrap_or_else(|| panic!("{} has no element matching {selector}", self.path()))
    }

    /// Clicks like a user and lets the server answer any navigation or
    /// form submission that follows.
    pub fn click(&mut self, selector: &str) {
        let before = self.browser_ref().navigations().len();
        self.browser().click_on(selector);
        self.respond(before);
    }

    pub fn fill(&mut self, selector: &str, value: &str) {
        let node = self.find(selector);
        self.browser().fill(node, value);
    }

    pub fn type_into(&mut self, selector: &str, text: &str) {
        let node = self.find(selector);
        self.browser().type_text(node, text);
    }

    fn respond(&mut self, navigations_before: usize) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let submissions = loaded.browser.submissions();
        if let Some(submission) = submissions.get(loaded.seen_submissions..).and_then(<[_]>::last) {
            let submission = submission.clone();
            loaded.seen_submissions = submissions.len();
            let dom = loaded.browser.dom();
            let form_id = submission.form.and_then(|f| dom.attr(f, "id"));
            if form_id.as_deref() == Some("login-form") {
                self.sign_in_with_form();
                return;
            }
        }
        if let Some(href) = loaded.browser.navigations().get(navigations_before..).and_then(<[_]>::last) {
            let href = href.clone();
            self.visit(&href);
        }
    }

    fn sign_in_with_form(&mut self) {
        let dom = self.browser_ref().dom();
        let field = |id: &str| dom.by_id(id).map(|n| dom.value(n)).unwrap_or_default();
        let accepted = field("id_username") == TEST_USERNAME && field("id_password") == TEST_PASSWORD;
        if accepted {
            self.signed_in = true;
            self.visit("/");
        } else {
            self.load("/login/", fixtures::signin(true, None));
        }
    }

    /// Whether a displayed element shows `text`.
    pub fn sees(&self, text: &str) -> bool {
        let dom = self.browser_ref().dom();
        dom.query_all("*")
            .into_iter()
            .filter(|&n| dom.text(n).contains(text))
            .filter(|&n| !dom.children_of(n).iter().any(|&c| dom.text(c).contains(text)))
            .any(|n| dom.is_visible(n))
    }

    /// Text of the first dialog heading or error summary heading.
    pub fn box_text(&self, kind: BoxKind) -> String {
        self.browser_ref().text(kind.selector())
    }

    pub fn is_visible(&self, selector: &str) -> bool {
        self.browser_ref().is_visible(selector)
    }

    /// Opens the page object named `name`, like "Given I am on the ... page".
    pub fn go_to(&mut self, name: &str) {
        let Some(path) = page_path(name) else {
            panic!(
                "Could not find page with name \"{name}\" in the page object map, \
                 did you remember to add it?"
            );
        };
        self.visit(path);
    }
}

/// A page of the site.
pub trait PageObject {
    const NAME: &'static str;
    const PATH: &'static str;

    fn get(&self, world: &mut World) {
        world.visit(Self::PATH);
    }
}

pub struct DashboardPage;
pub struct HistoryPage;
pub struct LockedPaymentsPage;
pub struct NewCreditsPage;
pub struct DisbursementsPage;
pub struct SigninPage;

impl PageObject for DashboardPage {
    const NAME: &'static str = "Dashboard";
    const PATH: &'static str = "/";
}

impl PageObject for HistoryPage {
    const NAME: &'static str = "History";
    const PATH: &'static str = "/history";
}

impl PageObject for LockedPaymentsPage {
    const NAME: &'static str = "Locked payments";
    const PATH: &'static str = "/locked";
}

impl PageObject for NewCreditsPage {
    const NAME: &'static str = "New credits";
    const PATH: &'static str = "/batch";
}

impl PageObject for DisbursementsPage {
    const NAME: &'static str = "Disbursements";
    const PATH: &'static str = "/disbursements/";
}

impl PageObject for SigninPage {
    const NAME: &'static str = "Sign in";
    const PATH: &'static str = "/login/";
}

fn page_path(name: &str) -> Option<&'static str> {
    [
        (DashboardPage::NAME, DashboardPage::PATH),
        (HistoryPage::NAME, HistoryPage::PATH),
        (LockedPaymentsPage::NAME, LockedPaymentsPage::PATH),
        (NewCreditsPage::NAME, NewCreditsPage::PATH),
        (DisbursementsPage::NAME, DisbursementsPage::PATH),
        (SigninPage::NAME, SigninPage::PATH),
    ]
    .into_iter()
    .find_map(|(n, path)| (n == name).then_some(path))
}

impl SigninPage {
    pub fn fill_form(&self, world: &mut World, username: &str, password: &str) {
        world.fill("#id_username", username);
        world.fill("#id_password", password);
        world.click("#login-form button[type=submit]");
    }

    /// Signs in with the test account.
    pub fn signin(&self, world: &mut World) {
        self.get(world);
        self.fill_form(world, TEST_USERNAME, TEST_PASSWORD);
    }

    pub fn signin_with(&self, world: &mut World, username: &str, password: &str) {
        self.fill_form(world, username, password);
    }

    pub fn signout(&self, world: &mut World) {
        world.visit("/logout/");
    }
}

/// "Given I am signed in"
pub fn signed_in() -> World {
    let mut world = World::new();
    SigninPage.signin(&mut world);
    assert!(world.is_signed_in(), "test account was rejected");
    world
}
