//! 账户类页面：注册、登录、账户菜单、收藏 / 待看列表

use std::cell::Cell;
use std::rc::Rc;

use marquee_shared::Collection;

use super::{PageAction, PageContext, PageUnit, PageView};
use crate::forms::{LoginForm, RegisterForm};
use crate::route::PageKind;

// =========================================================
// 登录
// =========================================================

pub struct LoginPage {
    ctx: PageContext,
    submitting: Cell<bool>,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            submitting: Cell::new(false),
        }
    }

    fn submit(self: Rc<Self>, form: LoginForm) {
        if let Err(errors) = form.validate() {
            self.ctx.show_error(&errors.to_string(), false);
            return;
        }
        if self.submitting.replace(true) {
            return;
        }
        self.ctx.render(PageView::Login { submitting: true });

        let api = self.ctx.services.api.clone();
        let this = self.clone();
        self.ctx.spawn(async move {
            let result = api.authenticate(form.email, form.password).await;
            this.submitting.set(false);
            if !this.ctx.is_current() {
                return;
            }
            match result {
                Ok(resp) if resp.success && resp.token().is_some() => {
                    if let Some(token) = resp.token() {
                        this.ctx.services.session.set_token(token);
                    }
                    crate::log_info!("[Page] login succeeded");
                    this.ctx.navigate(&this.ctx.services.config.account_path);
                }
                // 成功但没有 token 也按失败提示
                Ok(resp) => {
                    this.ctx.render(PageView::Login { submitting: false });
                    this.ctx.show_error(&resp.message, false);
                }
                Err(e) => {
                    let e = e.in_op("login.submit");
                    crate::log_error!("[Page] {}", e);
                    this.ctx.render(PageView::Login { submitting: false });
                    this.ctx.show_error(e.message(), false);
                }
            }
        });
    }
}

impl PageUnit for LoginPage {
    fn kind(&self) -> PageKind {
        PageKind::Login
    }

    fn on_mount(self: Rc<Self>) {
        self.ctx.render(PageView::Login { submitting: false });
    }

    fn dispatch(self: Rc<Self>, action: PageAction) {
        match action {
            PageAction::SubmitLogin(form) => self.submit(form),
            other => crate::log_debug!("[Page] Login ignores {:?}", other),
        }
    }
}

// =========================================================
// 注册
// =========================================================

pub struct RegisterPage {
    ctx: PageContext,
    submitting: Cell<bool>,
}

impl RegisterPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            submitting: Cell::new(false),
        }
    }

    fn submit(self: Rc<Self>, form: RegisterForm) {
        if let Err(errors) = form.validate() {
            self.ctx.show_error(&errors.to_string(), false);
            return;
        }
        if self.submitting.replace(true) {
            return;
        }
        self.ctx.render(PageView::Register { submitting: true });

        let api = self.ctx.services.api.clone();
        let executor = self.ctx.services.executor.clone();
        let this = self.clone();
        self.ctx.spawn(async move {
            let result = api.register(form.name, form.email, form.password).await;
            if !this.ctx.is_current() {
                return;
            }
            match result {
                Ok(resp) if resp.success => {
                    if let Some(token) = resp.token() {
                        this.ctx.services.session.set_token(token);
                    }
                    this.ctx.services.alerts.show(&resp.message);

                    let config = this.ctx.services.config.clone();
                    executor.sleep(config.register_confirm_delay).await;
                    this.ctx.close_alert();
                    if this.ctx.is_current() {
                        this.ctx.navigate(&config.login_path);
                    }
                }
                Ok(resp) => {
                    this.submitting.set(false);
                    this.ctx.render(PageView::Register { submitting: false });
                    this.ctx.show_error(&resp.message, false);
                }
                Err(e) => {
                    let e = e.in_op("register.submit");
                    crate::log_error!("[Page] {}", e);
                    this.submitting.set(false);
                    this.ctx.render(PageView::Register { submitting: false });
                    this.ctx.show_error(e.message(), false);
                }
            }
        });
    }
}

impl PageUnit for RegisterPage {
    fn kind(&self) -> PageKind {
        PageKind::Register
    }

    fn on_mount(self: Rc<Self>) {
        self.ctx.render(PageView::Register { submitting: false });
    }

    fn dispatch(self: Rc<Self>, action: PageAction) {
        match action {
            PageAction::SubmitRegister(form) => self.submit(form),
            other => crate::log_debug!("[Page] Register ignores {:?}", other),
        }
    }
}

// =========================================================
// 账户菜单
// =========================================================

pub struct AccountPage {
    ctx: PageContext,
}

impl AccountPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }
}

impl PageUnit for AccountPage {
    fn kind(&self) -> PageKind {
        PageKind::Account
    }

    fn on_mount(self: Rc<Self>) {
        self.ctx.render(PageView::Account);
    }
}

// =========================================================
// 收藏 / 待看
// =========================================================

pub struct CollectionPage {
    ctx: PageContext,
    collection: Collection,
}

impl CollectionPage {
    pub fn new(ctx: PageContext, collection: Collection) -> Self {
        Self { ctx, collection }
    }
}

impl PageUnit for CollectionPage {
    fn kind(&self) -> PageKind {
        match self.collection {
            Collection::Favorite => PageKind::Favorites,
            Collection::Watchlist => PageKind::Watchlist,
        }
    }

    fn on_mount(self: Rc<Self>) {
        let api = self.ctx.services.api.clone();
        let collection = self.collection;
        self.ctx.load(
            "account.collection",
            async move { api.collection(collection).await },
            move |ctx, movies| {
                ctx.render(PageView::Collection { collection, movies });
            },
        );
    }
}
