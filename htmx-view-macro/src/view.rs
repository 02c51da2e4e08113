use crate::signature::{self, Input};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Attribute, ImplItem, ImplItemFn,
    ItemImpl, LitStr, Token,
};

const DEFAULT_PREFIX: &str = "hx_";
const VERBS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

struct ViewArgs {
    prefix: String,
}

impl Parse for ViewArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut prefix = None;
        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if name == "prefix" {
                let lit: LitStr = input.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(lit, "prefix must not be empty"));
                }
                prefix = Some(lit.value());
            } else {
                return Err(syn::Error::new_spanned(name, "unknown #[htmx_view] argument"));
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(ViewArgs {
            prefix: prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        })
    }
}

struct ActionInfo {
    action: String,
    fn_name: syn::Ident,
    method: Option<String>,
    inputs: Vec<Input>,
    is_async: bool,
}

struct VerbInfo {
    verb: syn::Ident,
    fn_name: syn::Ident,
    is_async: bool,
}

pub fn htmx_view_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ViewArgs);
    let input = parse_macro_input!(item as ItemImpl);
    match generate_view_impl(&args, input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn generate_view_impl(args: &ViewArgs, mut input: ItemImpl) -> syn::Result<TokenStream2> {
    if input.trait_.is_some() {
        return Err(syn::Error::new_spanned(
            &input.self_ty,
            "#[htmx_view] must be placed on an inherent impl block",
        ));
    }

    let mut actions: Vec<ActionInfo> = Vec::new();
    let mut verbs: Vec<VerbInfo> = Vec::new();

    for item in input.items.iter_mut() {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let gate = take_verb_attr(method)?;
        let name = method.sig.ident.to_string();

        if let Some(action) = name.strip_prefix(args.prefix.as_str()) {
            if action.is_empty() {
                return Err(syn::Error::new_spanned(
                    &method.sig.ident,
                    "action name is empty after removing the prefix",
                ));
            }
            signature::check_receiver(method)?;
            actions.push(ActionInfo {
                action: action.to_string(),
                fn_name: method.sig.ident.clone(),
                method: gate,
                inputs: signature::action_inputs(method)?,
                is_async: method.sig.asyncness.is_some(),
            });
        } else if let Some(attr_verb) = gate {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                format!("#[{}] only applies to `{}` methods", attr_verb.to_lowercase(), args.prefix),
            ));
        } else if VERBS.contains(&name.as_str()) {
            signature::check_verb_handler(method)?;
            verbs.push(VerbInfo {
                verb: method.sig.ident.clone(),
                fn_name: method.sig.ident.clone(),
                is_async: method.sig.asyncness.is_some(),
            });
        }
    }

    let action_routes = actions.iter().map(generate_action_route);
    let as_view = generate_as_view(&verbs);

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics ::htmx_view::HtmxView for #self_ty #where_clause {
            fn actions(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::vec::Vec<::htmx_view::ActionRoute> {
                ::std::vec![#(#action_routes),*]
            }

            #as_view
        }
    })
}

/// Strips the verb attribute off a method and returns the verb in upper case.
fn take_verb_attr(method: &mut ImplItemFn) -> syn::Result<Option<String>> {
    let mut found: Option<String> = None;
    let mut duplicate: Option<Attribute> = None;
    method.attrs.retain(|attr| {
        let Some(ident) = attr.path().get_ident() else {
            return true;
        };
        let name = ident.to_string();
        if !VERBS.contains(&name.as_str()) {
            return true;
        }
        if found.is_some() {
            duplicate = Some(attr.clone());
        }
        found = Some(name.to_uppercase());
        false
    });
    if let Some(attr) = duplicate {
        return Err(syn::Error::new_spanned(
            attr,
            "an action accepts exactly one verb attribute",
        ));
    }
    Ok(found)
}

fn generate_action_route(info: &ActionInfo) -> TokenStream2 {
    let action = &info.action;
    let fn_name = &info.fn_name;

    let method = match &info.method {
        Some(verb) => {
            let verb = format_ident!("{}", verb);
            quote! { ::core::option::Option::Some(::htmx_view::http::Method::#verb) }
        }
        None => quote! { ::core::option::Option::None },
    };

    let params = info.inputs.iter().filter_map(|input| match input {
        Input::Path(param) => {
            let name = &param.name;
            let converter = param.converter.tokens();
            Some(quote! { ::htmx_view::UrlParameter::new(#name, #converter) })
        }
        Input::Request => None,
    });

    let conversions = info.inputs.iter().filter_map(|input| match input {
        Input::Path(param) => {
            let ident = &param.ident;
            let name = &param.name;
            let ty = &param.ty;
            Some(quote! {
                let #ident: #ty = match __args.parse::<#ty>(#name) {
                    ::core::result::Result::Ok(value) => value,
                    ::core::result::Result::Err(err) => return err.into_response(),
                };
            })
        }
        Input::Request => None,
    });

    let call_args: Vec<TokenStream2> = info
        .inputs
        .iter()
        .map(|input| match input {
            Input::Request => quote! { __request },
            Input::Path(param) => {
                let ident = &param.ident;
                quote! { #ident }
            }
        })
        .collect();

    let call = if info.is_async {
        quote! { view.#fn_name(#(#call_args),*).await }
    } else {
        quote! { view.#fn_name(#(#call_args),*) }
    };

    quote! {
        {
            let view = ::std::sync::Arc::clone(&self);
            ::htmx_view::ActionRoute::new(
                #action,
                #method,
                ::std::vec![#(#params),*],
                move |__request: ::htmx_view::axum::extract::Request,
                      __args: ::htmx_view::PathArgs| {
                    let view = ::std::sync::Arc::clone(&view);
                    async move {
                        use ::htmx_view::axum::response::IntoResponse;
                        #(#conversions)*
                        #call.into_response()
                    }
                },
            )
        }
    }
}

fn generate_as_view(verbs: &[VerbInfo]) -> TokenStream2 {
    if verbs.is_empty() {
        return TokenStream2::new();
    }

    let registrations = verbs.iter().map(|info| {
        let verb = &info.verb;
        let fn_name = &info.fn_name;
        let call = if info.is_async {
            quote! { view.#fn_name(__request).await }
        } else {
            quote! { view.#fn_name(__request) }
        };
        quote! {
            .#verb({
                let view = ::std::sync::Arc::clone(&self);
                move |__request: ::htmx_view::axum::extract::Request| {
                    let view = ::std::sync::Arc::clone(&view);
                    async move {
                        use ::htmx_view::axum::response::IntoResponse;
                        #call.into_response()
                    }
                }
            })
        }
    });

    quote! {
        fn as_view<__S>(
            self: ::std::sync::Arc<Self>,
        ) -> ::htmx_view::axum::routing::MethodRouter<__S>
        where
            __S: ::core::clone::Clone + ::core::marker::Send + ::core::marker::Sync + 'static,
        {
            ::htmx_view::axum::routing::MethodRouter::new() #(#registrations)*
        }
    }
}
